use crate::ports::outbound::NavigationState;
use crate::shared::error::DdgError;

/// Query parameter holding the visibility key
pub const VISIBILITY_KEY_PARAM: &str = "visibilityKey";
/// Query parameter holding the focal service
pub const SERVICE_PARAM: &str = "service";
/// Query parameter holding the focal operation
pub const OPERATION_PARAM: &str = "operation";

/// QueryStringNavigation adapter: navigation state kept in a URL query string
///
/// Parameters keep their original order, and parameters this tool does not
/// know about are carried through untouched, so a shared link round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStringNavigation {
    params: Vec<(String, String)>,
}

impl QueryStringNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string such as `service=api&operation=GET&visibilityKey=H`
    ///
    /// A leading `?` is ignored, `+` is read as a space and a parameter without
    /// `=` gets an empty value.
    ///
    /// # Errors
    /// Returns `DdgError::InvalidNavigationQuery` when a name or value is not
    /// valid percent-encoded UTF-8.
    pub fn parse(query: &str) -> Result<Self, DdgError> {
        let trimmed = query.trim().trim_start_matches('?');
        let mut params = Vec::new();

        for pair in trimmed.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.push((decode_component(query, name)?, decode_component(query, value)?));
        }

        Ok(Self { params })
    }

    /// Starts a navigation state for a focal service and optional operation
    pub fn for_focal(service: &str, operation: Option<&str>) -> Self {
        let mut params = vec![(SERVICE_PARAM.to_string(), service.to_string())];
        if let Some(operation) = operation {
            params.push((OPERATION_PARAM.to_string(), operation.to_string()));
        }
        Self { params }
    }

    /// First value recorded for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets `name` to `value`, replacing the first occurrence and dropping any repeats
    pub fn set(&mut self, name: &str, value: &str) {
        match self.params.iter().position(|(param, _)| param == name) {
            Some(first) => {
                self.params[first].1 = value.to_string();
                let mut idx = 0;
                self.params.retain(|(param, _)| {
                    let keep = idx <= first || param != name;
                    idx += 1;
                    keep
                });
            }
            None => self.params.push((name.to_string(), value.to_string())),
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl NavigationState for QueryStringNavigation {
    fn visibility_key(&self) -> Option<String> {
        self.get(VISIBILITY_KEY_PARAM).map(str::to_string)
    }

    fn replace_visibility_key(&mut self, key: &str) -> Result<(), DdgError> {
        self.set(VISIBILITY_KEY_PARAM, key);
        Ok(())
    }

    fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode_component(query: &str, component: &str) -> Result<String, DdgError> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| DdgError::InvalidNavigationQuery {
            query: query.to_string(),
            reason: format!("'{}' is not valid percent-encoded UTF-8: {}", component, e),
        })
}
