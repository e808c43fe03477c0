//! Flash messages carried across redirects in a short-lived cookie.
//!
//! A handler redirects with [`redirect_with_flash`]; the page it redirects to
//! reads the message with [`take_flash`], renders it once and clears the
//! cookie.

use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash_message";

/// Flash message structure stored in cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashMessage {
    /// Message type ("error", "success" or "info")
    #[serde(rename = "type")]
    pub message_type: String,
    pub message: String,
    /// Whether the message should auto-dismiss after a few seconds
    pub auto_dismiss: bool,
}

impl FlashMessage {
    /// Create an error flash message that requires manual dismissal.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message_type: "error".to_string(),
            message: message.into(),
            auto_dismiss: false,
        }
    }

    /// Create a success flash message that auto-dismisses.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message_type: "success".to_string(),
            message: message.into(),
            auto_dismiss: true,
        }
    }

    /// Serialize to JSON for cookie storage.
    pub fn to_cookie_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a cookie value, percent-encoded or not.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok().or_else(|| {
            let decoded = urlencoding::decode(value).ok()?;
            serde_json::from_str(&decoded).ok()
        })
    }

    /// Build a Set-Cookie header value for the flash message.
    ///
    /// Cookie properties:
    /// - Path: / (accessible from any page)
    /// - SameSite: Lax (sent on navigation, not cross-site requests)
    /// - Max-Age: 60 (expires after 60 seconds as a safety net)
    pub fn to_set_cookie_header(&self) -> String {
        let cookie_value = self.to_cookie_value();
        let encoded = urlencoding::encode(&cookie_value);
        format!("{FLASH_COOKIE}={encoded}; Path=/; SameSite=Lax; Max-Age=60")
    }
}

/// Create a redirect response with a flash message cookie.
pub fn redirect_with_flash(url: &str, flash: FlashMessage) -> Response {
    let cookie_header = flash.to_set_cookie_header();

    ([(SET_COOKIE, cookie_header)], Redirect::to(url)).into_response()
}

/// Reads the pending flash message and removes its cookie from the jar.
///
/// The returned jar must be part of the response for the removal to reach
/// the browser.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = FlashMessage::from_cookie_value(cookie.value());
    if flash.is_none() {
        tracing::debug!("Discarding unreadable flash cookie");
    }

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}
