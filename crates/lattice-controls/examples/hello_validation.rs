//! Validation sample: a form of controls with validators and a message list.
//!
//! Run with: cargo run -p lattice-controls --example hello_validation
//!
//! Set `RUST_LOG=lattice_controls=debug` to watch the engine work.

use std::sync::Arc;

use lattice_controls::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_messages(result: &ValidationResult) {
    if result.is_empty() {
        println!("  (no messages)");
    }
    for message in result {
        println!("  {message}");
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let support = ValidationSupport::new();

    // The message list is rebuilt from every published result.
    support.result_changed().connect(|result| {
        println!("validation result:");
        print_messages(result);
    });

    let text_field = Arc::new(ValueControl::new(ControlKind::TextField, ""));
    support.register_validator(text_field.clone(), empty_validator("Text is required"));

    let items = ["Item A", "Item B", "Item C"];
    let combo_box = Arc::new(ValueControl::with_options(ControlKind::ComboBox, items));
    support.register_validator(
        combo_box.clone(),
        empty_validator("ComboBox Selection required"),
    );

    let choice_box = Arc::new(ValueControl::with_options(ControlKind::ChoiceBox, items));
    support.register_validator(
        choice_box.clone(),
        empty_validator("ChoiceBox Selection required"),
    );

    let check_box = Arc::new(ValueControl::new(ControlKind::CheckBox, false));
    support.register_validator(
        check_box.clone(),
        CustomValidator::new(|control: &dyn Control, value: &Value| {
            ValidationResultBuilder::new(control.id())
                .add_error_if("Checkbox should be checked", || value.as_bool() != Some(true))
                .build()
        })
        .with_label("checked"),
    );

    let slider = Arc::new(ValueControl::new(ControlKind::Slider, -10.0));
    support.register_validator(
        slider.clone(),
        predicate_validator("Slider value should be > 0", |value: &Value| {
            value.as_float().is_some_and(|v| v <= 0.0)
        }),
    );

    let color_picker = Arc::new(ValueControl::new(ControlKind::ColorPicker, Color::RED));
    support.register_validator(
        color_picker.clone(),
        equals_validator("Color should be WHITE", [Color::WHITE]),
    );

    support.invalid_changed().connect(|invalid| {
        println!("form is now {}", if *invalid { "invalid" } else { "valid" });
    });

    println!("\n-- filling in the form --");
    text_field.set_value("Hello");
    combo_box.select(Some(0));
    choice_box.select(Some(1));
    check_box.set_value(true);
    slider.set_value(25.0);
    color_picker.set_value(Color::WHITE);

    println!("\n-- clearing the text field --");
    text_field.set_value("");
    println!(
        "text field decoration: {:?}, tooltip: {:?}",
        text_field.decoration(),
        text_field.tooltip()
    );
}
