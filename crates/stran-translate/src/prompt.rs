//! Instruction text sent with every translation request.

/// System instruction asking for a verbatim translation into `language_name`.
pub fn system_prompt(language_name: &str) -> String {
    format!(
        "You are a translator. Translate the given text to {language_name}. \
         Only respond with the translated text, without any additional \
         explanation or context."
    )
}
