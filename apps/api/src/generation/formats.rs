//! Content formats — the enumerated targets a request can ask for, each with
//! its own length and structure template.

use serde::{Deserialize, Serialize};

/// A named content type. Wire tags are kebab-case ("social-short-form",
/// "paid-ad", ...); unknown tags are rejected at deserialization, so the
/// generator never sees a format it has no template for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentFormat {
    Blog,
    SocialShortForm,
    SocialLongForm,
    PaidAd,
    Email,
    Newsletter,
}

impl ContentFormat {
    /// Human-readable name, used in role framing and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ContentFormat::Blog => "blog post",
            ContentFormat::SocialShortForm => "short-form social",
            ContentFormat::SocialLongForm => "long-form social",
            ContentFormat::PaidAd => "paid ad",
            ContentFormat::Email => "email",
            ContentFormat::Newsletter => "newsletter",
        }
    }

    /// Per-format instruction template: length target, sub-count, structural
    /// requirements, and output-formatting directives.
    pub fn instruction(&self) -> &'static str {
        match self {
            ContentFormat::Blog => {
                "Write one long-form blog post of 600-800 words with an \
                 introduction, a body organized under subheadings, and a \
                 conclusion ending in a call to action. Put the post title \
                 on the first line, then the body."
            }
            ContentFormat::SocialShortForm => {
                "Write 3 short social media posts, each under 280 characters, \
                 with varying angles on the topic. Number each post 1 to 3."
            }
            ContentFormat::SocialLongForm => {
                "Write one long-form social media post of 150-250 words that \
                 opens with a hook, develops a single argument or story in \
                 short paragraphs, and closes with a question or call to \
                 action."
            }
            ContentFormat::PaidAd => {
                "Write 3 paid ad variations. Each variation has a headline of \
                 at most 40 characters and a description of at most 125 \
                 characters. Number each variation and put the headline and \
                 description on separate labeled lines."
            }
            ContentFormat::Email => {
                "Write one marketing email with a subject line, a preview \
                 line, and a body of 150-300 words ending in a single call to \
                 action. Label the subject and preview lines."
            }
            ContentFormat::Newsletter => {
                "Write one newsletter edition with a title, a short intro, 3 \
                 themed sections with headers, and a sign-off. Keep the whole \
                 edition under 500 words."
            }
        }
    }
}
