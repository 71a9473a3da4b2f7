use crate::ids::ContactMessageId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ContactSubject {
    #[sea_orm(string_value = "information")]
    Information,
    #[sea_orm(string_value = "visit")]
    Visit,
    #[sea_orm(string_value = "history")]
    History,
    #[sea_orm(string_value = "education")]
    Education,
    #[sea_orm(string_value = "other")]
    Other,
}

impl ContactSubject {
    pub const ALL: [ContactSubject; 5] = [
        ContactSubject::Information,
        ContactSubject::Visit,
        ContactSubject::History,
        ContactSubject::Education,
        ContactSubject::Other,
    ];

    /// Form value, same as the stored one.
    pub fn code(&self) -> String {
        self.to_value()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactSubject::Information => "Solicitar información",
            ContactSubject::Visit => "Solicitar visita",
            ContactSubject::History => "Consulta histórica",
            ContactSubject::Education => "Información educativa",
            ContactSubject::Other => "Otro asunto",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub custom_subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub sent_at: DateTimeUtc,
    pub source_ip: Option<String>,
    pub is_read: bool,
    pub is_answered: bool,
}

impl Model {
    pub fn subject_line(&self) -> &str {
        match (&self.subject, &self.custom_subject) {
            (ContactSubject::Other, Some(custom)) => custom.as_str(),
            (subject, _) => subject.label(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
