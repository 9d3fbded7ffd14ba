//! Primitive-kind values

/// Literal zero of a primitive kind
pub fn zero_literal(kind: &str) -> Option<&'static str> {
    let literal = match kind {
        "bool" => "false",
        "string" => "\"\"",
        "error" => "nil",
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "float32" | "float64" | "complex64" | "complex128" | "byte"
        | "rune" => "0",
        _ => return None,
    };
    Some(literal)
}

/// Example-factory call producing a realistic value of a primitive kind
///
/// `error` is built with `errors.New`, so callers must import `errors`.
pub fn example_call(kind: &str, factory: &str) -> Option<String> {
    let call = match kind {
        "bool" => format!("{}.Bool()", factory),
        "string" => format!("{}.Word()", factory),
        "int8" | "int16" | "int32" | "int64" | "uint8" | "uint16" | "uint32" | "uint64"
        | "float32" | "float64" => format!("{}.{}()", factory, capitalize(kind)),
        "int" => format!("int({}.Int64())", factory),
        "uint" => format!("uint({}.Uint64())", factory),
        "uintptr" => format!("uintptr({}.Uint64())", factory),
        "byte" => format!("{}.Uint8()", factory),
        "rune" => format!("rune({}.Int32())", factory),
        "complex64" => format!("complex({0}.Float32(), {0}.Float32())", factory),
        "complex128" => format!("complex({0}.Float64(), {0}.Float64())", factory),
        "error" => format!("errors.New({}.Word())", factory),
        _ => return None,
    };
    Some(call)
}

fn capitalize(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
