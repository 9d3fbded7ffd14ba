//! Pieces shared by the builder and the mocker

use std::path::{Path, PathBuf};

use crate::config::{ExampleFactory, SynthConfig};
use crate::features::compiler::PackageInfo;
use crate::features::naming::{infer_name, is_exported};
use crate::features::parsing::domain::{
    package_name_from_path, Decl, GoFile, ImportSpec, StructType, TypeExpr, TypeShape,
};
use crate::features::value_synth::LocalType;

/// Every type the file declares, for the value synthesizer
pub fn local_types(file: &GoFile) -> Vec<(String, LocalType)> {
    file.decls
        .iter()
        .filter_map(|decl| match decl {
            Decl::Type(ty) => {
                let kind = match &ty.shape {
                    TypeShape::Struct(_) => LocalType::Struct,
                    TypeShape::Interface(_) => LocalType::Interface,
                    TypeShape::Func(_) => LocalType::Func,
                    TypeShape::Other(underlying) => LocalType::Other(underlying.clone()),
                };
                Some((ty.name.clone(), kind))
            }
            _ => None,
        })
        .collect()
}

/// Exported fields as `(name, type)`; embedded fields are named after their type
pub fn exported_fields(shape: &StructType) -> Vec<(String, TypeExpr)> {
    shape
        .fields
        .iter()
        .filter_map(|field| {
            let name = match &field.name {
                Some(name) => name.as_str(),
                None => infer_name(&field.ty)?,
            };
            is_exported(name).then(|| (name.to_string(), field.ty.clone()))
        })
        .collect()
}

/// Import of the example-value factory, aliased when its name differs from the path
pub fn factory_import(factory: &ExampleFactory) -> ImportSpec {
    let alias = (package_name_from_path(&factory.import_path) != factory.package)
        .then(|| factory.package.clone());
    ImportSpec::new(alias, factory.import_path.clone())
}

/// `<root>/<generate_dir>/<subdir>/<rel>/<file>`
pub(crate) fn helper_target(
    config: &SynthConfig,
    package: &PackageInfo,
    subdir: &str,
    file_name: &str,
) -> PathBuf {
    package
        .output_dir(&Path::new(&config.generate_dir).join(subdir))
        .join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::Field;

    #[test]
    fn test_exported_fields() {
        let shape = StructType {
            fields: vec![
                Field {
                    name: Some("ID".into()),
                    ty: TypeExpr::named("string"),
                    tag: None,
                },
                Field {
                    name: Some("secret".into()),
                    ty: TypeExpr::named("int"),
                    tag: None,
                },
                Field {
                    name: None,
                    ty: TypeExpr::pointer(TypeExpr::named("Base")),
                    tag: None,
                },
                Field {
                    name: None,
                    ty: TypeExpr::named("mutex"),
                    tag: None,
                },
            ],
        };
        let names: Vec<String> = exported_fields(&shape).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ID", "Base"]);
    }

    #[test]
    fn test_factory_import_alias() {
        let default = factory_import(&ExampleFactory::default());
        assert_eq!(default.alias, None);
        assert_eq!(default.path, "github.com/brianvoe/gofakeit/v6");

        let custom = factory_import(&ExampleFactory {
            import_path: "example.com/testing/fakes".into(),
            package: "fake".into(),
        });
        assert_eq!(custom.alias.as_deref(), Some("fake"));
    }

    #[test]
    fn test_helper_target() {
        let config = SynthConfig::default();
        let package = PackageInfo::new("example.com/app", "lookup", "/app", "internal/lookup");
        assert_eq!(
            helper_target(&config, &package, "mock", "service.go"),
            PathBuf::from("/app/gen/mock/internal/lookup/service.go")
        );
    }
}
