/// Languages the page lets the user pick for speech recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    English,
    Cantonese,
    Chinese,
    Unknown,
}

impl SourceLanguage {
    /// Exact, case-sensitive match on the recognizer's locale tag.
    pub fn from_locale(tag: &str) -> Self {
        match tag {
            "en-US" => SourceLanguage::English,
            "yue-Hant-HK" => SourceLanguage::Cantonese,
            "zh-TW" => SourceLanguage::Chinese,
            _ => SourceLanguage::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::English => "English",
            SourceLanguage::Cantonese => "Cantonese",
            SourceLanguage::Chinese => "Chinese",
            SourceLanguage::Unknown => "Unknown language",
        }
    }
}

pub fn build_prompt(text: &str, source_lang: &str, target_language: &str) -> String {
    format!(
        "Please translate the following {} text into {}:\n\n{}",
        SourceLanguage::from_locale(source_lang).name(),
        target_language,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_locales_name_their_language() {
        assert_eq!(SourceLanguage::from_locale("en-US").name(), "English");
        assert_eq!(SourceLanguage::from_locale("yue-Hant-HK").name(), "Cantonese");
        assert_eq!(SourceLanguage::from_locale("zh-TW").name(), "Chinese");
    }

    #[test]
    fn unknown_locales_fall_back_to_placeholder() {
        for tag in ["", "fr-FR", "EN-US", "zh-tw"] {
            assert_eq!(SourceLanguage::from_locale(tag), SourceLanguage::Unknown);
        }
    }

    #[test]
    fn prompt_names_source_and_target() {
        let prompt = build_prompt("hello there", "en-US", "Traditional Chinese");
        assert_eq!(
            prompt,
            "Please translate the following English text into Traditional Chinese:\n\nhello there"
        );

        let prompt = build_prompt("早晨", "yue-Hant-HK", "Traditional Chinese");
        assert!(prompt.starts_with("Please translate the following Cantonese text"));

        let prompt = build_prompt("bonjour", "fr-FR", "Traditional Chinese");
        assert!(prompt.contains("Unknown language text"));
        assert!(prompt.ends_with("\n\nbonjour"));
    }
}
