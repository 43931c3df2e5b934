use std::fmt::Write;

use rand::RngCore;

use app_api::AppContext;

const CSRF_TOKEN_BYTES: usize = 24;

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub csrf_token: String,
}

impl HttpState {
    pub fn new(context: AppContext, csrf_token: String) -> Self {
        Self {
            context,
            csrf_token,
        }
    }

    /// State with a fresh per-process token. Every page served by this
    /// process shares it; a restart invalidates outstanding pages.
    pub fn with_generated_token(context: AppContext) -> Self {
        Self::new(context, generate_csrf_token())
    }
}

pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().fold(
        String::with_capacity(CSRF_TOKEN_BYTES * 2),
        |mut token, byte| {
            let _ = write!(token, "{byte:02x}");
            token
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_lowercase_hex_of_the_full_width() {
        let token = generate_csrf_token();
        assert_eq!(token.len(), CSRF_TOKEN_BYTES * 2);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn tokens_differ_between_calls() {
        assert_ne!(generate_csrf_token(), generate_csrf_token());
    }
}
