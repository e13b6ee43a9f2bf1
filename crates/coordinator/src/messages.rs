//! Player-facing text, in English and Portuguese.
//!
//! Every string the dispatcher sends lives here. Category labels are not
//! translated — they come from the deployment's category configuration —
//! but everything around them is.

use muster_tracker::StatusSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub fn requester_only(&self, command: &str) -> String {
        match self {
            Language::En => format!("Only the commander can use {command}."),
            Language::Pt => format!("Apenas o comandante pode usar {command}."),
        }
    }

    pub fn fulfiller_only(&self, command: &str) -> String {
        match self {
            Language::En => format!("Only engineers can use {command}."),
            Language::Pt => format!("Apenas engenheiros podem usar {command}."),
        }
    }

    pub fn cooldown(&self, remaining_secs: u64, command: &str) -> String {
        match self {
            Language::En => format!("Wait {remaining_secs}s before using {command} again."),
            Language::Pt => format!("Aguarde {remaining_secs}s para usar {command} novamente."),
        }
    }

    pub fn team_not_found(&self) -> String {
        match self {
            Language::En => "Could not identify your team.".to_string(),
            Language::Pt => "Não consegui identificar seu time.".to_string(),
        }
    }

    pub fn no_fulfillers(&self) -> String {
        match self {
            Language::En => "No engineers found on your team.".to_string(),
            Language::Pt => "Nenhum engenheiro encontrado no seu time.".to_string(),
        }
    }

    pub fn request_sent(&self, count: usize, status: &str) -> String {
        match self {
            Language::En => {
                format!("Request sent to {count} engineer(s)!\nAwaiting confirmations: {status}")
            }
            Language::Pt => {
                format!("Solicitação enviada para {count} engenheiro(s)!\nAguardando confirmações: {status}")
            }
        }
    }

    pub fn request_broadcast(&self, labels: &str, command: &str, codes: &str) -> String {
        match self {
            Language::En => format!(
                "COMMANDER REQUESTED SUPPLIES!\nWe need: {labels}\nWhen finished, confirm: {command} [{codes}]"
            ),
            Language::Pt => format!(
                "COMANDANTE SOLICITOU SUPRIMENTOS!\nPrecisamos: {labels}\nQuando terminar, confirme: {command} [{codes}]"
            ),
        }
    }

    pub fn no_active_request(&self) -> String {
        match self {
            Language::En => "No supply request active at the moment.".to_string(),
            Language::Pt => "Nenhuma solicitação de suprimentos ativa no momento.".to_string(),
        }
    }

    pub fn usage(&self, command: &str, codes: &str, example: &str) -> String {
        match self {
            Language::En => format!("Use: {command} [{codes}]\nExample: {command} {example}"),
            Language::Pt => format!("Use: {command} [{codes}]\nExemplo: {command} {example}"),
        }
    }

    pub fn invalid_category(&self, codes: &str, command: &str, example: &str) -> String {
        match self {
            Language::En => {
                format!("Invalid type! Use: {codes}\nExample: {command} {example}")
            }
            Language::Pt => {
                format!("Tipo inválido! Use: {codes}\nExemplo: {command} {example}")
            }
        }
    }

    pub fn already_confirmed(&self, label: &str) -> String {
        match self {
            Language::En => format!("You already confirmed {label}."),
            Language::Pt => format!("Você já confirmou {label}."),
        }
    }

    pub fn confirmed(&self, label: &str, status: &str) -> String {
        match self {
            Language::En => format!("Confirmed: {label}\nStatus: {status}"),
            Language::Pt => format!("Confirmado: {label}\nStatus: {status}"),
        }
    }

    pub fn progress_update(&self, label: &str, status: &str) -> String {
        match self {
            Language::En => format!("Supply confirmed: {label}\nStatus: {status}"),
            Language::Pt => format!("Suprimento confirmado: {label}\nStatus: {status}"),
        }
    }

    pub fn all_confirmed(&self) -> String {
        match self {
            Language::En => "ALL SUPPLIES CONFIRMED!\nFull resources available!".to_string(),
            Language::Pt => "TODOS OS SUPRIMENTOS CONFIRMADOS!\nRecursos completos disponíveis!".to_string(),
        }
    }

    pub fn mission_complete(&self) -> String {
        match self {
            Language::En => "Mission complete! All supplies built!".to_string(),
            Language::Pt => "Missão completa! Todos os suprimentos construídos!".to_string(),
        }
    }
}

/// Render a status snapshot as one line, `[OK]` for satisfied categories
/// and `[...]` for pending ones: `[OK] Munition: 3/3 | [...] Fuel: 0/3`.
pub fn render_status(snapshot: &StatusSnapshot) -> String {
    snapshot
        .rows
        .iter()
        .map(|row| {
            let marker = if row.satisfied() { "[OK]" } else { "[...]" };
            format!("{} {}: {}/{}", marker, row.label, row.confirmed, row.required)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
