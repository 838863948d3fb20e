//! Arithmetic tools.
//!
//! ```rust
//! use switchboard::tools::math;
//!
//! assert_eq!(math::add(15.0, 25.0), 40.0);
//! assert_eq!(math::divide(7.0, 0.0), 0.0);
//! assert_eq!(math::percentage(200.0, 50.0), 100.0);
//! ```

use stooling::{ParamType, ToolDescriptor, ToolError, ToolRegistry, ToolValue};

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Division by zero yields `0` rather than infinity or NaN.
pub fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 { 0.0 } else { a / b }
}

/// Scales by the fraction first so `percent == 100` returns `number` unchanged.
pub fn percentage(number: f64, percent: f64) -> f64 {
    number * (percent / 100.0)
}

fn binary(name: &str, description: &str) -> ToolDescriptor {
    ToolDescriptor::new(name, description)
        .param("a", ParamType::Number, "The first number")
        .param("b", ParamType::Number, "The second number")
        .returns(ParamType::Number)
}

fn register_binary(
    registry: &mut ToolRegistry,
    descriptor: ToolDescriptor,
    operation: fn(f64, f64) -> f64,
) -> Result<(), ToolError> {
    registry.register_sync_fn(descriptor, move |args| {
        Ok(ToolValue::Number(operation(args.number("a")?, args.number("b")?)))
    })
}

pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    register_binary(registry, binary("Add", "Adds two numbers together"), add)?;
    register_binary(
        registry,
        binary("Subtract", "Subtracts the second number from the first"),
        subtract,
    )?;
    register_binary(registry, binary("Multiply", "Multiplies two numbers"), multiply)?;
    register_binary(
        registry,
        binary(
            "Divide",
            "Divides the first number by the second. Dividing by zero returns 0",
        ),
        divide,
    )?;

    registry.register_sync_fn(
        ToolDescriptor::new("Percentage", "Calculates a percentage of a number")
            .param("number", ParamType::Number, "The number to take a percentage of")
            .param("percent", ParamType::Number, "The percentage, e.g. 50 for 50%")
            .returns(ParamType::Number),
        |args| {
            Ok(ToolValue::Number(percentage(
                args.number("number")?,
                args.number("percent")?,
            )))
        },
    )
}
