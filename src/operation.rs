//! Path operation annotations.
//!
//! Renders the `@OA\{Method}` block that ties a route to the generated
//! request and response definitions.

use std::fmt;

use http::StatusCode;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::naming::title_case;
use crate::types::Role;

/// Matches `{name}` placeholders in a path template.
static PATH_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("valid path parameter pattern"));

/// Description of the success response.
pub const SUCCESS_DESCRIPTION: &str = "Successful response";

/// Description used for status codes without a standard reason phrase.
pub const DEFAULT_ERROR_DESCRIPTION: &str = "Bad Request";

/// Options for rendering a path operation.
#[derive(Debug, Clone)]
pub struct OperationOptions {
    /// Route template, e.g. `/users/{id}`.
    pub path: String,
    pub entity: String,
    /// HTTP method, normalized to title case (`"GET"` becomes `"Get"`).
    pub method: String,
    /// Response status codes; a leading code below 300 is the success response.
    pub codes: Vec<u16>,
}

impl OperationOptions {
    pub fn new(path: impl Into<String>, entity: impl Into<String>, method: &str) -> Self {
        Self {
            path: path.into(),
            entity: entity.into(),
            method: title_case(&method.to_lowercase()),
            codes: vec![200],
        }
    }

    /// Set the response status codes.
    pub fn codes(mut self, codes: Vec<u16>) -> Self {
        self.codes = codes;
        self
    }

    fn definition_name(&self, role: Role) -> String {
        format!("{}{}{}", self.method, self.entity, role.postfix())
    }
}

/// Names of the `{...}` placeholders in a path template, in order.
pub fn path_parameters(path: &str) -> Vec<&str> {
    PATH_PARAMETER
        .captures_iter(path)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Render the operation annotation.
pub fn render_operation(options: &OperationOptions) -> String {
    OperationText(options).to_string()
}

struct OperationText<'a>(&'a OperationOptions);

impl fmt::Display for OperationText<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.0;

        writeln!(out, "     * @OA\\{}(", options.method)?;
        writeln!(out, "     *          path=\"{}\",", options.path)?;
        writeln!(out, "     *          summary=\"CHANGE_ME\",")?;
        writeln!(out, "     *          tags={{\"CHANGE_ME\"}},")?;

        for parameter in path_parameters(&options.path) {
            writeln!(out, "     *          @OA\\Parameter(")?;
            writeln!(out, "     *              name=\"{}\",", parameter)?;
            writeln!(out, "     *              in=\"path\",")?;
            writeln!(out, "     *              @OA\\Schema(type=\"string\"),")?;
            writeln!(out, "     *              required=true,")?;
            writeln!(out, "     *          ),")?;
        }

        writeln!(out, "     *          @OA\\RequestBody(")?;
        writeln!(out, "     *              required=true,")?;
        writeln!(
            out,
            "     *              @OA\\JsonContent(ref={}::class),",
            options.definition_name(Role::Request)
        )?;
        writeln!(out, "     *          ),")?;

        let mut codes = options.codes.as_slice();
        if let Some((&success, rest)) = codes.split_first() {
            if success < 300 {
                writeln!(out, "     *          @OA\\Response(")?;
                writeln!(out, "     *              response={},", success)?;
                writeln!(out, "     *              description=\"{}\",", SUCCESS_DESCRIPTION)?;
                writeln!(
                    out,
                    "     *              @OA\\JsonContent(ref={}::class),",
                    options.definition_name(Role::Response)
                )?;
                writeln!(out, "     *          ),")?;
                codes = rest;
            }
        }

        for &code in codes {
            writeln!(
                out,
                "     *          @OA\\Response(response={}, description=\"{}\"),",
                code,
                status_text(code).unwrap_or(DEFAULT_ERROR_DESCRIPTION)
            )?;
        }

        writeln!(out, "     * )")
    }
}

/// Standard reason phrase of an HTTP status code.
pub fn status_text(code: u16) -> Option<&'static str> {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_path_parameters() {
        assert_eq!(
            path_parameters("/users/{userId}/orders/{orderId}"),
            ["userId", "orderId"]
        );
        assert!(path_parameters("/users").is_empty());
    }

    #[test]
    fn method_is_title_cased() {
        let options = OperationOptions::new("/users", "User", "POST");
        assert_eq!(options.method, "Post");
    }

    #[test]
    fn renders_full_operation() {
        let options =
            OperationOptions::new("/users/{id}", "User", "get").codes(vec![200, 404, 499]);

        let expected = r#"     * @OA\Get(
     *          path="/users/{id}",
     *          summary="CHANGE_ME",
     *          tags={"CHANGE_ME"},
     *          @OA\Parameter(
     *              name="id",
     *              in="path",
     *              @OA\Schema(type="string"),
     *              required=true,
     *          ),
     *          @OA\RequestBody(
     *              required=true,
     *              @OA\JsonContent(ref=GetUserApiRequest::class),
     *          ),
     *          @OA\Response(
     *              response=200,
     *              description="Successful response",
     *              @OA\JsonContent(ref=GetUserApiResponse::class),
     *          ),
     *          @OA\Response(response=404, description="Not Found"),
     *          @OA\Response(response=499, description="Bad Request"),
     * )
"#;
        assert_eq!(render_operation(&options), expected);
    }

    #[test]
    fn error_only_codes_have_no_success_response() {
        let options = OperationOptions::new("/users", "User", "Delete").codes(vec![400, 500]);
        let text = render_operation(&options);

        assert!(!text.contains("ApiResponse::class"));
        assert!(text.contains("@OA\\Response(response=400, description=\"Bad Request\"),"));
        assert!(text.contains(
            "@OA\\Response(response=500, description=\"Internal Server Error\"),"
        ));
    }

    #[test]
    fn error_descriptions_use_reason_phrases() {
        let options = OperationOptions::new("/files", "File", "post").codes(vec![201, 413]);
        let text = render_operation(&options);

        assert!(text.contains("     *              response=201,\n"));
        assert!(text.contains(
            "@OA\\Response(response=413, description=\"Payload Too Large\"),"
        ));
    }

    #[test]
    fn no_codes() {
        let options = OperationOptions::new("/users", "User", "Put").codes(vec![]);
        let text = render_operation(&options);
        assert!(!text.contains("@OA\\Response"));
        assert!(text.ends_with("     * )\n"));
    }

    #[test]
    fn status_texts() {
        assert_eq!(status_text(201), Some("Created"));
        assert_eq!(status_text(413), Some("Payload Too Large"));
        assert_eq!(status_text(422), Some("Unprocessable Entity"));
        assert_eq!(status_text(299), None);
        assert_eq!(status_text(42), None);
    }
}
