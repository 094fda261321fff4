//! Locale selection and user-facing strings

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ja,
    En,
}

#[derive(Error, Debug)]
#[error("unknown locale: {0}")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    WeakPassword,
    EmailAlreadyRegistered,
    Title,
    Submit,
    RememberPassword,
    HaveAccount,
}

impl Locale {
    pub fn text(&self, message: Message) -> &'static str {
        match (self, message) {
            (Locale::Ja, Message::WeakPassword) => "パスワードは6文字以上にしてください",
            (Locale::Ja, Message::EmailAlreadyRegistered) => "そのメールアドレスは既に登録されています",
            (Locale::Ja, Message::Title) => "会員登録",
            (Locale::Ja, Message::Submit) => "会員登録",
            (Locale::Ja, Message::RememberPassword) => "パスワードを記憶する",
            (Locale::Ja, Message::HaveAccount) => "アカウントをお持ちの方はこちら",
            (Locale::En, Message::WeakPassword) => "Password must be at least 6 characters",
            (Locale::En, Message::EmailAlreadyRegistered) => "This email address is already registered",
            (Locale::En, Message::Title) => "Sign up",
            (Locale::En, Message::Submit) => "Sign up",
            (Locale::En, Message::RememberPassword) => "Remember password",
            (Locale::En, Message::HaveAccount) => "Already have an account? Sign in",
        }
    }
}
