use crate::config::CONFIG;
use crate::data_models::{FindPersonRequest, PersonMatch, PersonQuery};
use crate::error::LookupError;

/// Something that can answer a `findPerson` query.
pub trait PersonLookup: Send + Sync {
    fn find_person(
        &self,
        query: &PersonQuery,
    ) -> impl Future<Output = Result<Vec<PersonMatch>, LookupError>> + Send;
}

/// Client for the WikiTree `findPerson` action. One POST per call, no retry.
#[derive(Debug, Clone)]
pub struct WikiTreeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl WikiTreeClient {
    pub fn new(endpoint: impl Into<String>) -> WikiTreeClient {
        WikiTreeClient {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config() -> WikiTreeClient {
        Self::new(CONFIG.lookup_endpoint.clone())
    }

    async fn post_find_person(&self, query: &PersonQuery) -> Result<Vec<PersonMatch>, LookupError> {
        let body = FindPersonRequest::from(query);
        // status is not checked; any JSON body is read
        let res = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(LookupError::Transport)?;
        let bytes = res.bytes().await.map_err(LookupError::Transport)?;
        parse_persons(&bytes)
    }
}

impl PersonLookup for WikiTreeClient {
    async fn find_person(&self, query: &PersonQuery) -> Result<Vec<PersonMatch>, LookupError> {
        let matches = self.post_find_person(query).await?;
        tracing::debug!(
            "findPerson {} {}: {} match(es)",
            query.first_name,
            query.last_name,
            matches.len()
        );
        Ok(matches)
    }
}

/// Reads the `persons` array of a response body. A body that is not a JSON
/// object, has no `persons` key, or has a falsy one (`null`, `false`, `0`,
/// `""`) yields no matches. Entries of any shape are accepted.
pub fn parse_persons(body: &[u8]) -> Result<Vec<PersonMatch>, LookupError> {
    let data: serde_json::Value = serde_json::from_slice(body).map_err(LookupError::Parse)?;
    let persons = match data.get("persons") {
        None => return Ok(Vec::new()),
        Some(persons) if is_falsy(persons) => return Ok(Vec::new()),
        Some(persons) => persons,
    };
    let entries: Vec<serde_json::Value> =
        serde_json::from_value(persons.clone()).map_err(LookupError::Parse)?;
    Ok(entries.iter().map(PersonMatch::from_entry).collect())
}

fn is_falsy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    }
}
