use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::{fmt, sync::OnceLock};

/// Every message is delivered by the visitor's own mail client to this inbox.
pub const RECIPIENT: &str = "cerveretaprofe@gmail.com";
pub const HANDOFF_MESSAGE: &str = "Abriendo tu cliente de email...";

/// After a handoff, repeat submits are ignored for this long.
const RESUBMIT_GUARD_MS: f64 = 1_000.0;

const SUBJECT_PREFIX: &str = "Contacto desde portafolio: ";
const SIGNATURE: &str = "Enviado desde el portafolio web de José Cervera";

/// Characters `encodeURIComponent` leaves untouched.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ContactError {
    MissingField(Field),
    InvalidEmail,
}

impl ContactError {
    /// Copy shown to the visitor in the error toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::MissingField(_) => "Por favor, completa todos los campos.",
            ContactError::InvalidEmail => "Por favor, introduce un email válido.",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ContactError::MissingField(_) => "missing_field",
            ContactError::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::MissingField(field) => write!(f, "required field `{}` is empty", field.as_str()),
            ContactError::InvalidEmail => write!(f, "email address is malformed"),
        }
    }
}

impl std::error::Error for ContactError {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// `local@domain.tld` shape check; nothing stricter.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Subject, &self.subject),
            (Field::Message, &self.message),
        ];

        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(ContactError::MissingField(*field));
        }

        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(())
    }

    fn body(&self) -> String {
        format!(
            "\nNombre: {}\nEmail: {}\nAsunto: {}\n\nMensaje:\n{}\n\n---\n{SIGNATURE}\n",
            self.name, self.email, self.subject, self.message
        )
    }

    /// Validated, pre-filled `mailto:` link.
    pub fn mailto_link(&self) -> Result<String, ContactError> {
        self.validate()?;

        let subject = encode_component(&format!("{SUBJECT_PREFIX}{}", self.subject));
        let body = encode_component(&self.body());

        Ok(format!("mailto:{RECIPIENT}?subject={subject}&body={body}"))
    }
}

/// Blocks a second mail-client handoff right after a successful one.
/// Rejected submissions never arm it.
#[derive(Clone, Debug, Default)]
pub struct HandoffGuard {
    last_handoff_ms: Option<f64>,
}

impl HandoffGuard {
    pub fn admits(&self, now_ms: f64) -> bool {
        self.last_handoff_ms
            .map_or(true, |last| now_ms - last >= RESUBMIT_GUARD_MS)
    }

    pub fn record_handoff(&mut self, now_ms: f64) {
        self.last_handoff_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: "Clases".into(),
            message: "¿Hay plazas?".into(),
        }
    }

    #[test]
    fn complete_form_builds_mailto_link() {
        let link = filled().mailto_link().expect("valid form");

        assert!(link.starts_with("mailto:cerveretaprofe@gmail.com?subject="));
        assert!(link.contains("subject=Contacto%20desde%20portafolio%3A%20Clases&body="));
        assert!(link.contains("&body=%0ANombre%3A%20Ana%0AEmail%3A%20ana%40example.com"));
        assert!(link.contains("%C2%BFHay%20plazas%3F"));
        assert!(link.contains("Jos%C3%A9%20Cervera"));
    }

    #[test]
    fn empty_field_is_reported_in_form_order() {
        let mut form = filled();
        form.subject.clear();
        form.message.clear();

        assert_eq!(form.mailto_link(), Err(ContactError::MissingField(Field::Subject)));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = filled();
        form.email = "abc".into();

        let error = form.mailto_link().expect_err("shape check fails");
        assert_eq!(error, ContactError::InvalidEmail);
        assert_eq!(error.user_message(), "Por favor, introduce un email válido.");
    }

    #[test]
    fn email_shape_check_matches_expected_cases() {
        assert!(is_valid_email("x@y.z"));
        assert!(!is_valid_email("x@y"));
        assert!(!is_valid_email("x y@z.com"));
        assert!(!is_valid_email("x@@y.com"));
    }

    #[test]
    fn component_encoding_keeps_unreserved_marks() {
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)j k&l"), "a-b_c.d!e~f*g'h(i)j%20k%26l");
    }

    #[test]
    fn rejected_submits_never_arm_the_guard() {
        let guard = HandoffGuard::default();
        assert!(guard.admits(0.0));
        assert!(guard.admits(10.0));
        assert!(guard.admits(20.0));
    }

    #[test]
    fn guard_blocks_only_the_second_after_a_handoff() {
        let mut guard = HandoffGuard::default();
        guard.record_handoff(1_000.0);

        assert!(!guard.admits(1_500.0));
        assert!(!guard.admits(1_999.0));
        assert!(guard.admits(2_000.0));
    }
}
