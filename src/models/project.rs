use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AssociationRef, IdRef, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub nome: String,
    #[serde(rename = "dataCriacao", default, with = "server_date")]
    pub data_criacao: Option<NaiveDate>,
    #[serde(default)]
    pub funcionarios: Vec<AssociationRef>,
}

impl Project {
    pub fn employee_ids(&self) -> Vec<i64> {
        self.funcionarios.iter().map(|f| f.id).collect()
    }
}

impl Record for Project {
    fn id(&self) -> i64 {
        self.id
    }

    fn nome(&self) -> &str {
        &self.nome
    }
}

/// Body of `POST /projetos` and `PUT /projetos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPayload {
    pub nome: String,
    #[serde(rename = "dataCriacao", with = "server_date")]
    pub data_criacao: Option<NaiveDate>,
    pub funcionarios: Vec<IdRef>,
}

/// Creation dates travel as `yyyy-mm-dd`. The backend may also answer with a
/// full timestamp; an offset-carrying one is reduced to its UTC calendar day,
/// a naive one to the day as written.
pub mod server_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Some(timestamp.with_timezone(&Utc).date_naive());
        }
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|timestamp| timestamp.date())
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&crate::format::canonical_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("unrecognised date `{}`", value))
            }),
        }
    }
}
