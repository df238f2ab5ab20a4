//! Menu dispatcher — a pure mapping from normalized contact input to a
//! reply. No I/O and no clock reads: the hour of day, sender name, and
//! ticket number come in as arguments so the same inputs always produce
//! the same reply.

use atende_domain::config::MenuConfig;

/// A reply the dispatcher decided to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The numbered menu. The handler marks the session initiated.
    Menu(String),
    /// A canned option reply.
    Canned(String),
    /// Bare number outside the option table.
    Invalid(String),
    /// Exit-confirmation prompt.
    ExitPrompt(String),
    /// Closing message after the contact confirmed.
    Goodbye(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Menu(t)
            | Reply::Canned(t)
            | Reply::Invalid(t)
            | Reply::ExitPrompt(t)
            | Reply::Goodbye(t) => t,
        }
    }
}

/// Map one inbound message to a reply, or `None` for silent ignore.
///
/// Unmatched free text gets no reply on purpose: answering every stray
/// message in a busy inbox reads as spam.
pub fn dispatch(
    menu: &MenuConfig,
    input: &str,
    hour: u32,
    sender_name: &str,
    ticket: u32,
) -> Option<Reply> {
    let command = input.trim().to_lowercase();
    if command.is_empty() {
        return None;
    }

    if menu.triggers.iter().any(|t| t == &command) {
        return Some(Reply::Menu(render_menu(menu, hour, sender_name)));
    }

    if let Some(option) = menu.options.iter().find(|o| o.key == command) {
        let text = option.reply.replace("{ticket}", &ticket.to_string());
        return Some(Reply::Canned(text));
    }

    if is_bare_integer(&command) {
        return Some(Reply::Invalid(menu.invalid_reply.clone()));
    }

    if menu.exit_words.iter().any(|w| w == &command) {
        return Some(Reply::ExitPrompt(menu.exit_prompt.clone()));
    }

    // Deliberately stateless: a bare confirmation closes the conversation
    // whether or not the prompt was shown first.
    if menu.confirm_words.iter().any(|w| w == &command) {
        return Some(Reply::Goodbye(menu.goodbye.clone()));
    }

    None
}

/// Time-of-day greeting, local hour.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Bom dia",
        12..=17 => "Boa tarde",
        _ => "Boa noite",
    }
}

fn render_menu(menu: &MenuConfig, hour: u32, sender_name: &str) -> String {
    let header = menu
        .header
        .replace("{greeting}", greeting_for_hour(hour))
        .replace("{name}", sender_name);

    let mut lines = Vec::with_capacity(menu.options.len() + 4);
    lines.push(header);
    lines.push(String::new());
    for option in &menu.options {
        lines.push(format!("*[{}]* {}", option.key, option.label));
    }
    lines.push(String::new());
    lines.push(menu.footer.clone());
    lines.join("\n")
}

fn is_bare_integer(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuConfig {
        MenuConfig::default()
    }

    #[test]
    fn menu_trigger_at_nine_greets_good_morning() {
        let reply = dispatch(&menu(), "menu", 9, "Ana", 12345).unwrap();
        let Reply::Menu(text) = reply else {
            panic!("expected menu, got {reply:?}");
        };
        assert!(text.contains("Bom dia"));
        assert!(text.contains("*Ana*"));
        assert_eq!(text.matches("*[").count(), 5, "five numbered options");
        assert!(text.contains("*[3]*"));
    }

    #[test]
    fn greeting_windows() {
        assert_eq!(greeting_for_hour(5), "Bom dia");
        assert_eq!(greeting_for_hour(11), "Bom dia");
        assert_eq!(greeting_for_hour(12), "Boa tarde");
        assert_eq!(greeting_for_hour(17), "Boa tarde");
        assert_eq!(greeting_for_hour(18), "Boa noite");
        assert_eq!(greeting_for_hour(3), "Boa noite");
    }

    #[test]
    fn input_is_trimmed_and_case_folded() {
        assert!(matches!(
            dispatch(&menu(), "  MENU  ", 9, "Ana", 1),
            Some(Reply::Menu(_))
        ));
        assert!(matches!(
            dispatch(&menu(), "OLÁ", 9, "Ana", 1),
            Some(Reply::Menu(_))
        ));
    }

    #[test]
    fn option_three_returns_the_work_with_us_reply() {
        let reply = dispatch(&menu(), "3", 14, "Ana", 1).unwrap();
        assert_eq!(
            reply,
            Reply::Canned("💼 Envie seu currículo para: rh@empresa.com".into())
        );
    }

    #[test]
    fn option_one_embeds_the_session_ticket() {
        let reply = dispatch(&menu(), "1", 14, "Ana", 48213).unwrap();
        assert!(reply.text().contains("Protocolo: 48213"));
    }

    #[test]
    fn unknown_bare_integers_are_invalid_options() {
        for input in ["9", "6", "42", "007"] {
            let reply = dispatch(&menu(), input, 14, "Ana", 1).unwrap();
            assert!(
                matches!(reply, Reply::Invalid(_)),
                "{input} should be invalid"
            );
        }
    }

    #[test]
    fn free_text_is_silently_ignored() {
        assert_eq!(dispatch(&menu(), "qual o horário?", 14, "Ana", 1), None);
        assert_eq!(dispatch(&menu(), "", 14, "Ana", 1), None);
        assert_eq!(dispatch(&menu(), "   ", 14, "Ana", 1), None);
    }

    #[test]
    fn exit_word_prompts_for_confirmation() {
        let reply = dispatch(&menu(), "sair", 14, "Ana", 1).unwrap();
        assert!(matches!(reply, Reply::ExitPrompt(_)));
        let reply = dispatch(&menu(), "SIM", 14, "Ana", 1).unwrap();
        assert!(matches!(reply, Reply::Goodbye(_)));
    }

    #[test]
    fn unprompted_confirmation_still_closes() {
        // The exit flow is stateless by design: "sim" without a preceding
        // "sair" gets the closing message too.
        let reply = dispatch(&menu(), "sim", 14, "Ana", 1).unwrap();
        assert!(matches!(reply, Reply::Goodbye(_)));
    }

    #[test]
    fn dispatch_is_deterministic() {
        let first = dispatch(&menu(), "menu", 9, "Ana", 777);
        let second = dispatch(&menu(), "menu", 9, "Ana", 777);
        assert_eq!(first, second);
    }
}
