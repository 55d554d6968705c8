// ── Contact form submission ──

use tracing::{info, warn};

use yogi_api::{ContactForm, ContactResponse};

use crate::api::SiteApi;
use crate::error::CoreError;

/// Reject blank fields and obviously malformed email addresses before
/// anything goes over the wire.
pub fn validate_contact(form: &ContactForm) -> Result<(), CoreError> {
    let fields = [
        ("name", &form.name),
        ("email", &form.email),
        ("subject", &form.subject),
        ("message", &form.message),
    ];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::ValidationFailed {
            message: format!("missing required fields: {}", missing.join(", ")),
        });
    }

    let email = form.email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(CoreError::ValidationFailed {
            message: format!("'{email}' is not a valid email address"),
        });
    }
    Ok(())
}

pub async fn submit_contact<A: SiteApi>(
    api: &A,
    form: &ContactForm,
) -> Result<ContactResponse, CoreError> {
    validate_contact(form)?;
    match api.submit_contact_form(form).await {
        Ok(resp) => {
            info!(success = resp.success, "contact form submitted");
            Ok(resp)
        }
        Err(e) => {
            warn!(error = %e, "contact form submission failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: email.into(),
            subject: "Hello".into(),
            message: message.into(),
        }
    }

    #[test]
    fn accepts_complete_form() {
        assert!(validate_contact(&form("ada@example.com", "hi")).is_ok());
    }

    #[test]
    fn names_blank_fields() {
        let err = validate_contact(&form("ada@example.com", "  ")).expect_err("blank");
        assert_eq!(err.to_string(), "Validation failed: missing required fields: message");
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["ada", "@example.com", "ada@localhost"] {
            assert!(
                matches!(
                    validate_contact(&form(bad, "hi")),
                    Err(CoreError::ValidationFailed { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }
}
