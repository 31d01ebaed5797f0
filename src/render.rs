//! Annotated class text for a definition.

use std::fmt;

use crate::emit::Definition;
use crate::types::{FieldDescriptor, FieldKind};

/// Render a definition as an annotated PHP class.
///
/// The class carries an `@OA\Schema` docblock listing every field as
/// required, then one `@OA\Property` per field in group order.
pub fn render_definition(definition: &Definition<'_>) -> String {
    DefinitionText(definition).to_string()
}

struct DefinitionText<'a, 'b>(&'a Definition<'b>);

impl fmt::Display for DefinitionText<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definition = self.0;

        writeln!(f, "<?php")?;
        writeln!(f)?;
        writeln!(f, "declare(strict_types=1);")?;
        writeln!(f)?;
        writeln!(f, "namespace {};", definition.namespace())?;
        writeln!(f)?;
        writeln!(f, "use OpenApi\\Annotations as OA;")?;
        writeln!(f)?;
        writeln!(f, "/**")?;
        writeln!(f, " * @OA\\Schema(")?;
        writeln!(f, " *     type=\"object\",")?;
        writeln!(f, " *     required={{")?;
        for name in definition.group.field_names() {
            writeln!(f, " *       \"{}\",", name)?;
        }
        writeln!(f, " *     }}")?;
        writeln!(f, " * )")?;
        writeln!(f, " */")?;
        writeln!(f, "final class {}", definition.class_name())?;
        writeln!(f, "{{")?;

        for (i, field) in definition.group.fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_property(f, definition, field)?;
        }

        writeln!(f, "}}")
    }
}

fn write_property(
    f: &mut fmt::Formatter<'_>,
    definition: &Definition<'_>,
    field: &FieldDescriptor,
) -> fmt::Result {
    let reference_class = field
        .reference
        .as_deref()
        .map(|group| definition.reference_class_name(group));

    let var_type = match (field.kind, &reference_class) {
        (FieldKind::Reference, Some(class)) => class.as_str(),
        (kind, _) => php_type(kind),
    };

    writeln!(f, "    /**")?;
    writeln!(f, "     * @var {}", var_type)?;
    writeln!(f, "     *")?;
    writeln!(f, "     * @OA\\Property(")?;
    writeln!(f, "     *     type=\"{}\",", openapi_type(field.kind))?;

    match field.kind {
        FieldKind::StringArray | FieldKind::MixedArray => {
            writeln!(f, "     *     @OA\\Items(type=\"string\"),")?;
        }
        FieldKind::IntArray => {
            writeln!(f, "     *     @OA\\Items(type=\"integer\"),")?;
        }
        FieldKind::Reference => {
            if let Some(class) = &reference_class {
                writeln!(f, "     *     ref=\"#/components/schemas/{}\",", class)?;
            }
        }
        _ => {
            if let Some(example) = &field.example {
                writeln!(f, "     *     example={},", example)?;
            }
        }
    }

    writeln!(f, "     * )")?;
    writeln!(f, "     */")?;
    writeln!(
        f,
        "    {} ${};",
        definition.role.property_visibility(),
        field.name
    )
}

/// Type named in the `@var` tag.
fn php_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Int => "int",
        FieldKind::Float => "float",
        FieldKind::Bool => "bool",
        FieldKind::String => "string",
        FieldKind::StringArray => "string[]",
        FieldKind::IntArray => "int[]",
        FieldKind::MixedArray => "array<mixed>",
        FieldKind::Reference => "object",
    }
}

/// Type named in the `@OA\Property` annotation. Floats are documented as
/// strings, matching their quoted examples.
fn openapi_type(kind: FieldKind) -> &'static str {
    if kind.is_array() {
        return "array";
    }
    match kind {
        FieldKind::Int => "integer",
        FieldKind::Bool => "bool",
        FieldKind::Reference => "object",
        _ => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_sample;
    use crate::types::{GenerateOptions, Role};
    use serde_json::json;

    fn render_group(sample: serde_json::Value, group: &str, options: &GenerateOptions) -> String {
        let result = infer_sample(&sample).unwrap();
        let group = result.get(group).unwrap();
        render_definition(&Definition::new(group, options))
    }

    #[test]
    fn renders_scalar_properties() {
        let options = GenerateOptions::new("User", "Get", Role::Response);
        let text = render_group(
            json!({"id": 48, "nickname": "Tester 1", "isUser": true}),
            "root",
            &options,
        );

        let expected = r#"<?php

declare(strict_types=1);

namespace Infrastructure\Swagger\User\Response;

use OpenApi\Annotations as OA;

/**
 * @OA\Schema(
 *     type="object",
 *     required={
 *       "id",
 *       "nickname",
 *       "isUser",
 *     }
 * )
 */
final class GetUserApiResponse
{
    /**
     * @var int
     *
     * @OA\Property(
     *     type="integer",
     *     example=48,
     * )
     */
    public $id;

    /**
     * @var string
     *
     * @OA\Property(
     *     type="string",
     *     example="Tester 1",
     * )
     */
    public $nickname;

    /**
     * @var bool
     *
     * @OA\Property(
     *     type="bool",
     *     example=false,
     * )
     */
    public $isUser;
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn renders_reference_property() {
        let options = GenerateOptions::new("User", "Get", Role::Response);
        let text = render_group(json!({"id": 48, "sub": {"nickname": "n"}}), "root", &options);

        assert!(text.contains(
            "     * @var GetSubApiResponse\n\
             \x20    *\n\
             \x20    * @OA\\Property(\n\
             \x20    *     type=\"object\",\n\
             \x20    *     ref=\"#/components/schemas/GetSubApiResponse\",\n"
        ));
        assert!(text.contains("    public $sub;\n"));
    }

    #[test]
    fn renders_array_properties() {
        let options = GenerateOptions::new("User", "Get", Role::Response);
        let text = render_group(
            json!({"tags": ["a"], "ids": [1], "items": [{"id": 1}]}),
            "root",
            &options,
        );

        assert!(text.contains("@var string[]"));
        assert!(text.contains("@var int[]"));
        assert!(text.contains("@var array<mixed>"));
        assert!(text.contains("     *     type=\"array\",\n     *     @OA\\Items(type=\"integer\"),\n"));
        assert_eq!(text.matches("@OA\\Items(type=\"string\")").count(), 2);
        assert!(!text.contains("example="));
    }

    #[test]
    fn renders_float_as_string() {
        let options = GenerateOptions::new("Price", "Get", Role::Response);
        let text = render_group(json!({"amount": 0.1}), "root", &options);

        assert!(text.contains("@var float"));
        assert!(text.contains("     *     type=\"string\",\n     *     example=\"0.1\",\n"));
    }

    #[test]
    fn request_properties_are_private() {
        let options = GenerateOptions::new("User", "Post", Role::Request);
        let text = render_group(json!({"id": 1}), "root", &options);

        assert!(text.contains("namespace Infrastructure\\Swagger\\User\\Request;"));
        assert!(text.contains("final class PostUserApiRequest"));
        assert!(text.contains("    private $id;\n"));
    }

    #[test]
    fn renders_empty_group() {
        let options = GenerateOptions::new("User", "Get", Role::Response);
        let text = render_group(json!({"meta": {}}), "meta", &options);

        assert!(text.contains(" *     required={\n *     }\n"));
        assert!(text.ends_with("final class GetMetaApiResponse\n{\n}\n"));
    }
}
