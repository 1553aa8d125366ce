use serde::{Deserialize, Serialize};

/// The kind of callout, taken from the `[!TYPE]` marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutType {
    /// Supplementary information for the surrounding content
    Info,

    /// Urgent info that needs immediate user attention to avoid problems
    Warning,

    /// Helpful advice for doing things better or more easily
    Tip,

    /// Advises about risks or negative outcomes of certain actions
    Danger,

    /// Useful information that users should know, even when skimming content
    #[default]
    Note,

    /// Positive confirmation or a completed outcome
    Success,
}

impl CalloutType {
    pub(crate) const ALL: [CalloutType; 6] = [
        CalloutType::Info,
        CalloutType::Warning,
        CalloutType::Tip,
        CalloutType::Danger,
        CalloutType::Note,
        CalloutType::Success,
    ];

    /// The tag spelled the way the serializer emits it.
    pub fn tag(&self) -> &'static str {
        match *self {
            CalloutType::Info => "INFO",
            CalloutType::Warning => "WARNING",
            CalloutType::Tip => "TIP",
            CalloutType::Danger => "DANGER",
            CalloutType::Note => "NOTE",
            CalloutType::Success => "SUCCESS",
        }
    }

    /// Returns the default title for a callout type
    pub(crate) fn default_title(&self) -> String {
        match *self {
            CalloutType::Info => String::from("Info"),
            CalloutType::Warning => String::from("Warning"),
            CalloutType::Tip => String::from("Tip"),
            CalloutType::Danger => String::from("Danger"),
            CalloutType::Note => String::from("Note"),
            CalloutType::Success => String::from("Success"),
        }
    }

    /// Returns the CSS class to use for a callout type
    pub(crate) fn css_class(&self) -> String {
        match *self {
            CalloutType::Info => String::from("callout-info"),
            CalloutType::Warning => String::from("callout-warning"),
            CalloutType::Tip => String::from("callout-tip"),
            CalloutType::Danger => String::from("callout-danger"),
            CalloutType::Note => String::from("callout-note"),
            CalloutType::Success => String::from("callout-success"),
        }
    }
}

/// Match a blockquote's first line against the `[!TYPE]` marker.  Tags
/// match caselessly; an unrecognized tag leaves the quote a plain
/// blockquote.
pub(crate) fn scan_marker(text: &str) -> Option<CalloutType> {
    let text = text.trim();
    let tag = text.strip_prefix("[!")?.strip_suffix(']')?;
    CalloutType::ALL
        .iter()
        .copied()
        .find(|t| caseless::default_caseless_match_str(tag, t.tag()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_match_caselessly() {
        assert_eq!(scan_marker("[!WARNING]"), Some(CalloutType::Warning));
        assert_eq!(scan_marker("[!note]"), Some(CalloutType::Note));
        assert_eq!(scan_marker("[!Tip]"), Some(CalloutType::Tip));
        assert_eq!(scan_marker("  [!success]  "), Some(CalloutType::Success));
        assert_eq!(scan_marker("[!SHRUG]"), None);
        assert_eq!(scan_marker("[WARNING]"), None);
        assert_eq!(scan_marker("plain text"), None);
    }
}
