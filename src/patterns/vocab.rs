//! Immutable pattern and vocabulary tables for the pt-BR recognizers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered phone matcher templates, most specific first. Every match is
/// re-validated and canonicalized before it is kept, so overlap between
/// templates is harmless.
pub(super) static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // (11) 99999-9999 / (11) 3333-4444
        r"\(\d{2}\)\s?\d{4,5}[-.\s]?\d{4}",
        // 11 99999-9999
        r"\b\d{2}\s\d{4,5}[-.\s]?\d{4}\b",
        // +55 11 99999-9999 / +55 (11) 99999-9999
        r"\+55\s?\(?\d{2}\)?\s?\d{4,5}[-.\s]?\d{4}",
        // general fallback: bare digit runs with optional separators
        r"\b\d{2}[\s.-]?\d{4,5}[-.\s]?\d{4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

/// Broad email shape; candidates are lowercased and re-validated against
/// the full grammar in `validate_email`.
pub(super) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

/// Capitalized word shape, Unicode-aware for accented Portuguese letters.
pub(super) static NAME_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}\p{Ll}+$").expect("valid name word regex"));

/// Linking words that stay lowercase inside a Portuguese name.
pub(super) const NAME_PARTICLES: &[&str] = &[
    "da", "de", "do", "dos", "das", "del", "della", "van", "von", "le", "la", "el",
];

/// Capitalized words that never start or continue a person name, matched
/// case-insensitively during token scanning.
pub(super) const NAME_STOP_WORDS: &[&str] = &[
    "contato",
    "contatos",
    "contact",
    "email",
    "e-mail",
    "mail",
    "telefone",
    "telefones",
    "phone",
    "celular",
    "fone",
    "fax",
    "whatsapp",
    "empresa",
    "company",
    "ltda",
    "cnpj",
    "cpf",
    "rua",
    "avenida",
    "endereco",
    "endereço",
    "cep",
    "site",
    "pagina",
    "página",
    "home",
    "login",
    "senha",
    "cadastro",
    "vendas",
    "suporte",
    "comercial",
    "financeiro",
    "departamento",
    "setor",
    "brasil",
    "www",
];

/// Vocabulary that disqualifies a whole phrase as a person name: days of
/// the week and months in Portuguese and English, plus contact terms.
pub(super) const NON_NAME_VOCAB: &[&str] = &[
    // weekdays, pt
    "segunda", "terca", "terça", "quarta", "quinta", "sexta", "sabado", "sábado", "domingo",
    "feira",
    // weekdays, en
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    // months, pt
    "janeiro", "fevereiro", "marco", "março", "abril", "maio", "junho", "julho", "agosto",
    "setembro", "outubro", "novembro", "dezembro",
    // months, en
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
    // contact terms
    "email", "e-mail", "mail", "telefone", "phone", "contato", "contact", "celular", "mobile",
    "fone",
];

/// Does a table/dl header label a name column?
pub(crate) fn is_name_header(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    ["nome", "name"].iter().any(|k| t.contains(k))
}

/// Does a table/dl header label a phone column?
pub(crate) fn is_phone_header(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    ["telefone", "celular", "fone", "phone", "tel", "whatsapp"]
        .iter()
        .any(|k| t.contains(k))
}

/// Does a table/dl header label an email column?
pub(crate) fn is_email_header(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    ["e-mail", "email", "mail"].iter().any(|k| t.contains(k))
}
