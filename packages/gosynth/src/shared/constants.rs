//! Centralized constants
//!
//! Process-wide immutable tables. Every table here is the default for a
//! `SynthConfig` field; code that needs one takes it from the config so
//! tests can pass their own.

/// Package classification
pub mod classification {
    /// Import-path segments that mark a package as a decoratable layer
    pub const LAYER_NAMES: &[&str] = &["handler", "controller", "gateway", "repository"];

    /// Package name of an executable entry point
    pub const ENTRY_PACKAGE: &str = "main";

    /// Function name of an executable entry point
    pub const ENTRY_FUNC: &str = "main";
}

/// Output layout
pub mod output {
    /// Root for decorated (proxy) packages
    pub const DECORATE_DIR: &str = "build";

    /// Root for test-helper packages
    pub const GENERATE_DIR: &str = "gen";

    /// Mock subtree below `GENERATE_DIR`
    pub const MOCK_SUBDIR: &str = "mock";

    /// Builder subtree below `GENERATE_DIR`
    pub const FACTORY_SUBDIR: &str = "factory";

    /// Directories never treated as packages
    pub const EXCLUDED_DIRS: &[&str] = &["build", "gen", "vendor", "testdata"];

    /// Best-effort dump of output that failed formatting or validation
    pub const DEBUG_LOG: &str = "gosynth-debug.log";

    /// Optional per-project configuration file
    pub const CONFIG_FILE: &str = "gosynth.yaml";
}

/// Object-language conventions
pub mod go {
    /// Source file extension
    pub const SOURCE_EXT: &str = "go";

    /// Test file suffix
    pub const TEST_SUFFIX: &str = "_test.go";

    /// Module manifest
    pub const MODULE_FILE: &str = "go.mod";

    /// Prefix of a derived import alias
    pub const ALIAS_MARKER: char = '_';

    /// Field holding the delegate in a generated proxy
    pub const DELEGATE_FIELD: &str = "delegate";

    /// Predeclared types with a literal zero value
    pub const PRIMITIVE_TYPES: &[&str] = &[
        "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
        "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128", "byte",
        "rune", "error",
    ];

    /// Predeclared types that are never package-qualified
    pub const PREDECLARED_TYPES: &[&str] = &[
        "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
        "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128", "byte",
        "rune", "error", "any", "comparable",
    ];

    /// Reserved words
    pub const KEYWORDS: &[&str] = &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ];
}

/// Value synthesis
pub mod synthesis {
    /// Elements per synthesized slice, array, map or channel
    pub const EXAMPLE_CARDINALITY: usize = 2;

    /// Upper bound accepted from configuration
    pub const MAX_EXAMPLE_CARDINALITY: usize = 16;

    /// Default example-value factory package
    pub const FACTORY_IMPORT_PATH: &str = "github.com/brianvoe/gofakeit/v6";

    /// Identifier the factory package is referenced by
    pub const FACTORY_PACKAGE: &str = "gofakeit";
}
