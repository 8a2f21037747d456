use super::handlers::{
    auth::{password, signin, signup, types},
    health, protected, ErrorResponse,
};
use crate::auth::PublicAccount;
use utoipa::openapi::{Contact, InfoBuilder, License};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        signup::signup,
        signin::signin,
        password::forgot_password,
        password::reset_password,
        protected::protected_resource,
    ),
    components(schemas(
        health::Health,
        types::SignUpRequest,
        types::SignInRequest,
        types::SignInResponse,
        types::ForgotPasswordRequest,
        types::ResetPasswordRequest,
        types::MessageResponse,
        PublicAccount,
        ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Sign-up, sign-in and password recovery"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

/// The `OpenAPI` document for every served route, with info taken from Cargo.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info = cargo_info();
    doc
}

fn cargo_info() -> utoipa::openapi::Info {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();
    info
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    let Some(start) = author.find('<') else {
        let name = author.trim();
        return (if name.is_empty() { None } else { Some(name) }, None);
    };
    let name = author.get(..start).unwrap_or_default().trim();
    let email = author
        .get(start + 1..)
        .unwrap_or_default()
        .trim_end_matches('>')
        .trim();
    let name = if name.is_empty() { None } else { Some(name) };
    let email = if email.is_empty() { None } else { Some(email) };
    (name, email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));

        let contact = doc.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Team Keyward"));
            assert_eq!(contact.email.as_deref(), Some("team@keyward.dev"));
        }

        assert_eq!(
            doc.info.license.map(|license| license.name),
            Some("BSD-3-Clause".to_string())
        );
    }

    #[test]
    fn openapi_lists_auth_paths() {
        let doc = openapi();
        for path in [
            "/api/health",
            "/api/signup",
            "/api/signin",
            "/api/forgot-password",
            "/api/reset-password",
            "/api/protected-resource",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Jane <jane@example.com>"),
            (Some("Jane"), Some("jane@example.com"))
        );
        assert_eq!(parse_author("Jane"), (Some("Jane"), None));
        assert_eq!(parse_author("<jane@example.com>"), (None, Some("jane@example.com")));
    }
}
