/// Application name
pub const APP_NAME: &str = "Causa";

/// Fixed taxonomy of legal practice areas a case can be filed under.
pub const LEGAL_AREAS: [&str; 16] = [
    "Direito Trabalhista",
    "Direito do Trânsito",
    "Direito Civil",
    "Direito Imobiliário",
    "Direito de Família",
    "Direito Criminal",
    "Direito Previdenciário",
    "Direito do Consumidor",
    "Direito Tributário",
    "Direito Empresarial",
    "Direito Bancário",
    "Direito Digital",
    "Direito Médico",
    "Direito Eleitoral",
    "Direito Ambiental",
    "Propriedade Intelectual",
];

/// Brazilian federative unit codes, used for case locations and OAB
/// registrations.
pub const STATES_BR: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG",
    "PA", "PB", "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum chat message length in characters.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Maximum size of a single case attachment in bytes (10 MiB).
pub const MAX_ATTACHMENT_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of attachments per case submission.
pub const MAX_ATTACHMENTS: usize = 10;

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Length of a session token in characters.
pub const SESSION_TOKEN_LEN: usize = 43;

/// Returns `true` if `area` is part of the fixed legal-area taxonomy.
pub fn is_legal_area(area: &str) -> bool {
    LEGAL_AREAS.contains(&area)
}

/// Returns `true` if `uf` is a valid Brazilian federative unit code.
pub fn is_state_code(uf: &str) -> bool {
    STATES_BR.contains(&uf)
}
