//! DeepL language code tables and validation.

use anyhow::Result;

use crate::ui::Style;

/// Source language codes accepted by the API.
pub const SOURCE_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nb", "Norwegian (Bokmål)"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh", "Chinese"),
];

/// Target language codes. Regional variants replace the bare `en`, `pt`
/// and `zh` on the target side.
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en-gb", "English (British)"),
    ("en-us", "English (American)"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nb", "Norwegian (Bokmål)"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt-br", "Portuguese (Brazilian)"),
    ("pt-pt", "Portuguese (European)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh-hans", "Chinese (Simplified)"),
    ("zh-hant", "Chinese (Traditional)"),
];

/// Prints the supported source and target language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Source language codes"));
    for (code, name) in SOURCE_LANGUAGES {
        println!("  {:8} {}", Style::code(code), Style::secondary(name));
    }

    println!();
    println!("{}", Style::header("Target language codes"));
    for (code, name) in TARGET_LANGUAGES {
        println!("  {:8} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates a source language code, case-insensitively.
pub fn validate_source_language(lang: &str) -> Result<()> {
    let normalized = lang.trim().to_lowercase();
    if SOURCE_LANGUAGES.iter().any(|(code, _)| *code == normalized) {
        Ok(())
    } else {
        anyhow::bail!(
            "Invalid source language code: '{lang}'\n\n\
             Run 'dlb languages' to see all supported codes."
        )
    }
}

/// Validates a target language code, case-insensitively.
pub fn validate_target_language(lang: &str) -> Result<()> {
    let normalized = lang.trim().to_lowercase();
    if TARGET_LANGUAGES.iter().any(|(code, _)| *code == normalized) {
        Ok(())
    } else {
        anyhow::bail!(
            "Invalid target language code: '{lang}'\n\n\
             Note that the target side uses regional variants for some\n\
             languages, e.g. en-us, en-gb, pt-br.\n\
             Run 'dlb languages' to see all supported codes."
        )
    }
}
