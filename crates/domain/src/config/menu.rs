use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Menu & canned replies
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The numbered service menu and its canned replies. Everything here is
/// plain data; the dispatcher renders and matches against it.
///
/// Trigger and exit/confirm words are matched case-insensitively against
/// trimmed input, so they should be stored lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// First line of the menu. `{greeting}` and `{name}` are substituted.
    #[serde(default = "d_header")]
    pub header: String,
    /// Last line of the menu.
    #[serde(default = "d_footer")]
    pub footer: String,
    /// Literal inputs that open the menu.
    #[serde(default = "d_triggers")]
    pub triggers: Vec<String>,
    /// The numbered options, in display order.
    #[serde(default = "d_options")]
    pub options: Vec<MenuOption>,
    /// Reply for a bare number that is not an option key.
    #[serde(default = "d_invalid_reply")]
    pub invalid_reply: String,
    /// Literal inputs that open the exit confirmation.
    #[serde(default = "d_exit_words")]
    pub exit_words: Vec<String>,
    /// Literal inputs that confirm the exit.
    #[serde(default = "d_confirm_words")]
    pub confirm_words: Vec<String>,
    #[serde(default = "d_exit_prompt")]
    pub exit_prompt: String,
    #[serde(default = "d_goodbye")]
    pub goodbye: String,
}

/// One numbered menu entry. `reply` may contain `{ticket}`, substituted
/// with the session's service-ticket number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOption {
    pub key: String,
    pub label: String,
    pub reply: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            header: d_header(),
            footer: d_footer(),
            triggers: d_triggers(),
            options: d_options(),
            invalid_reply: d_invalid_reply(),
            exit_words: d_exit_words(),
            confirm_words: d_confirm_words(),
            exit_prompt: d_exit_prompt(),
            goodbye: d_goodbye(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_header() -> String {
    "{greeting}, *{name}*! 👋".into()
}
fn d_footer() -> String {
    "Digite o número da opção:".into()
}
fn d_triggers() -> Vec<String> {
    ["menu", "oi", "olá", "ola", "bom dia", "boa tarde", "boa noite"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn d_options() -> Vec<MenuOption> {
    let opt = |key: &str, label: &str, reply: &str| MenuOption {
        key: key.into(),
        label: label.into(),
        reply: reply.into(),
    };
    vec![
        opt(
            "1",
            "🛍️  Falar com Vendedor",
            "📞 Um vendedor entrará em contato em breve! Protocolo: {ticket}",
        ),
        opt(
            "2",
            "💰  Financeiro",
            "💰 Envie seu CPF/CNPJ para consulta financeira.",
        ),
        opt(
            "3",
            "💼  Trabalhe Conosco",
            "💼 Envie seu currículo para: rh@empresa.com",
        ),
        opt(
            "4",
            "🔔  Ofertas",
            "🔔 Cadastro realizado! Você receberá nossas ofertas.",
        ),
        opt(
            "5",
            "📍  Localização",
            "📍 Av. Principal, 123 - Centro\nhttps://maps.app.goo.gl/xxxx",
        ),
    ]
}
fn d_invalid_reply() -> String {
    "❌ Opção inválida. Digite MENU para ver as opções.".into()
}
fn d_exit_words() -> Vec<String> {
    vec!["sair".into(), "parar".into()]
}
fn d_confirm_words() -> Vec<String> {
    vec!["sim".into(), "yes".into()]
}
fn d_exit_prompt() -> String {
    "Deseja encerrar o atendimento? Digite SIM para confirmar.".into()
}
fn d_goodbye() -> String {
    "✅ Atendimento encerrado. Obrigado pelo contato!".into()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
