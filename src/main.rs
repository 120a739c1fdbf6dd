use marker_i18n::{Config, TranslationTable, Translator, compile, escape};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marker_i18n=info".parse()?),
        )
        .init();

    let translator = Translator::from_config(&Config::from_env())?;

    let mut en_messages = TranslationTable::new();
    en_messages
        .with_message("greeting", "Hello, %1!")
        .with_message("unread", "You have %1 unread messages in %2");
    translator
        .store()
        .add_translation("en", "demo", en_messages);

    let samples = [
        "[[demo:greeting, World]]".to_string(),
        compile(["demo:unread", "3", "Inbox"]),
        "[[demo:not-translated-yet]]".to_string(),
        format!("Literal marker: {}", escape("[[demo:greeting]]")),
    ];

    for sample in &samples {
        println!("Localized: {}", translator.translate(sample, "en").await);
    }

    Ok(())
}
