//! User-facing strings in English and Spanish.
//!
//! Every piece of text the rendering layer prints goes through [`Msg`] so
//! that switching the language preference switches the whole interface.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    En,
    /// Spanish
    Es,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Es => write!(f, "es"),
        }
    }
}

/// Message catalog keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Anonymous,
    OtherPrefix,
    ThanksForResponse,
    FixErrorsFirst,
    ResponseDeleted,
    AllResponsesCleared,
    ConfirmDelete,
    ConfirmClearAll,
    ConfirmImportReplace,
    Cancelled,
    NoResponsesYet,
    RecentResponses,
    TotalResponses,
    Last7Days,
    Satisfaction,
    AverageAge,
    Years,
    LatestResponse,
    NoDataTitle,
    NoDataHint,
    SatisfactionChart,
    FavoritesChart,
    ReactionsChart,
    ReactionAdded,
    ReactionRemoved,
    ResponseNotFound,
    Exported,
    Imported,
    DashboardTitle,
    SurveyTitle,
    ThemeDark,
    ThemeLight,
    LanguageSet,
}

impl Msg {
    /// Returns the message text in the given language.
    pub fn text(self, lang: Language) -> &'static str {
        use Language::{En, Es};
        match (self, lang) {
            (Msg::Anonymous, En) => "Anonymous",
            (Msg::Anonymous, Es) => "Anónimo",
            (Msg::OtherPrefix, En) => "Other",
            (Msg::OtherPrefix, Es) => "Otra",
            (Msg::ThanksForResponse, En) => "Thanks for your response!",
            (Msg::ThanksForResponse, Es) => "¡Gracias por tu respuesta!",
            (Msg::FixErrorsFirst, En) => "Please fix the errors before submitting",
            (Msg::FixErrorsFirst, Es) => "Por favor corrige los errores antes de enviar",
            (Msg::ResponseDeleted, En) => "Response deleted",
            (Msg::ResponseDeleted, Es) => "Respuesta eliminada",
            (Msg::AllResponsesCleared, En) => "All responses were deleted",
            (Msg::AllResponsesCleared, Es) => "Se eliminaron todas las respuestas",
            (Msg::ConfirmDelete, En) => "Delete this response?",
            (Msg::ConfirmDelete, Es) => "¿Borrar esta respuesta?",
            (Msg::ConfirmClearAll, En) => "Clear all responses? This cannot be undone.",
            (Msg::ConfirmClearAll, Es) => {
                "¿Limpiar todas las respuestas? Esta acción no se puede deshacer."
            }
            (Msg::ConfirmImportReplace, En) => "Replace all stored responses with the import?",
            (Msg::ConfirmImportReplace, Es) => {
                "¿Reemplazar todas las respuestas guardadas con la importación?"
            }
            (Msg::Cancelled, En) => "Cancelled",
            (Msg::Cancelled, Es) => "Cancelado",
            (Msg::NoResponsesYet, En) => "No responses yet. Be the first.",
            (Msg::NoResponsesYet, Es) => "Aún no hay respuestas. Sé el primero.",
            (Msg::RecentResponses, En) => "Recent responses",
            (Msg::RecentResponses, Es) => "Respuestas recientes",
            (Msg::TotalResponses, En) => "Total Responses",
            (Msg::TotalResponses, Es) => "Total Respuestas",
            (Msg::Last7Days, En) => "Last 7 days",
            (Msg::Last7Days, Es) => "Últimos 7 días",
            (Msg::Satisfaction, En) => "Satisfaction",
            (Msg::Satisfaction, Es) => "Satisfacción",
            (Msg::AverageAge, En) => "Average Age",
            (Msg::AverageAge, Es) => "Edad Media",
            (Msg::Years, En) => "years",
            (Msg::Years, Es) => "años",
            (Msg::LatestResponse, En) => "Latest Response",
            (Msg::LatestResponse, Es) => "Última Respuesta",
            (Msg::NoDataTitle, En) => "No data to display",
            (Msg::NoDataTitle, Es) => "No hay datos para mostrar",
            (Msg::NoDataHint, En) => "Complete the survey to see statistics and charts here.",
            (Msg::NoDataHint, Es) => {
                "Completa la encuesta para ver estadísticas y gráficos aquí."
            }
            (Msg::SatisfactionChart, En) => "Satisfaction Distribution",
            (Msg::SatisfactionChart, Es) => "Distribución de Satisfacción",
            (Msg::FavoritesChart, En) => "Favorite Aspects",
            (Msg::FavoritesChart, Es) => "Aspectos Favoritos",
            (Msg::ReactionsChart, En) => "Reactions",
            (Msg::ReactionsChart, Es) => "Reacciones",
            (Msg::ReactionAdded, En) => "Reaction added",
            (Msg::ReactionAdded, Es) => "Reacción añadida",
            (Msg::ReactionRemoved, En) => "Reaction removed",
            (Msg::ReactionRemoved, Es) => "Reacción quitada",
            (Msg::ResponseNotFound, En) => "No response with that id",
            (Msg::ResponseNotFound, Es) => "No existe una respuesta con ese id",
            (Msg::Exported, En) => "Responses exported to",
            (Msg::Exported, Es) => "Respuestas exportadas a",
            (Msg::Imported, En) => "Responses imported",
            (Msg::Imported, Es) => "Respuestas importadas",
            (Msg::DashboardTitle, En) => "Survey Dashboard",
            (Msg::DashboardTitle, Es) => "Panel de la Encuesta",
            (Msg::SurveyTitle, En) => "Survey: Digital Experience 2025",
            (Msg::SurveyTitle, Es) => "Encuesta: Experiencia Digital 2025",
            (Msg::ThemeDark, En) => "Dark theme enabled",
            (Msg::ThemeDark, Es) => "Modo oscuro activado",
            (Msg::ThemeLight, En) => "Light theme enabled",
            (Msg::ThemeLight, Es) => "Modo claro activado",
            (Msg::LanguageSet, En) => "Language set to English",
            (Msg::LanguageSet, Es) => "Idioma cambiado a español",
        }
    }
}

/// Formats a timestamp the way the given language writes dates, in local time.
pub fn format_timestamp(at: &DateTime<Utc>, lang: Language) -> String {
    let local = at.with_timezone(&Local);
    match lang {
        Language::En => local.format("%m/%d/%Y, %I:%M:%S %p").to_string(),
        Language::Es => local.format("%d/%m/%Y, %H:%M:%S").to_string(),
    }
}
