use crate::models::Client;

/// Search box state for the clients tab
#[derive(Debug, Clone, Default)]
pub struct ClientSearch {
    query: String,
    /// Keystrokes go to the query while active
    pub active: bool,
}

impl ClientSearch {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Clients whose name or email contains the query, ignoring case.
    /// A blank query keeps every client; order is preserved.
    pub fn apply<'a>(&self, clients: &'a [Client]) -> Vec<&'a Client> {
        filter_clients(clients, &self.query)
    }
}

pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return clients.iter().collect();
    }

    clients.iter().filter(|c| c.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, name: &str, email: &str) -> Client {
        Client {
            id: id.to_string(),
            full_name: name.to_string(),
            email: email.to_string(),
            avatar: None,
            last_workout: None,
            streak: 0,
        }
    }

    fn names(clients: &[&Client]) -> Vec<String> {
        clients.iter().map(|c| c.full_name.clone()).collect()
    }

    #[test]
    fn test_search_actually_filters() {
        let clients = vec![
            client("1", "Ana", "ana@example.com"),
            client("2", "Beto", "beto@example.com"),
        ];

        let mut search = ClientSearch::default();
        search.set_query("ana");

        assert_eq!(names(&search.apply(&clients)), vec!["Ana"]);
    }

    #[test]
    fn test_search_matches_email_case_insensitive() {
        let clients = vec![
            client("1", "Ana", "ana@gym.io"),
            client("2", "Beto", "BETO@Studio.com"),
        ];

        assert_eq!(names(&filter_clients(&clients, "studio")), vec!["Beto"]);
        assert_eq!(names(&filter_clients(&clients, "  ANA ")), vec!["Ana"]);
        assert!(filter_clients(&clients, "zed").is_empty());
    }

    #[test]
    fn test_blank_query_keeps_all() {
        let clients = vec![client("1", "Ana", "a@x"), client("2", "Beto", "b@x")];
        assert_eq!(filter_clients(&clients, "   ").len(), 2);
    }

    #[test]
    fn test_editing_query() {
        let mut search = ClientSearch::default();
        search.push('b');
        search.push('e');
        search.pop();
        assert_eq!(search.query(), "b");
        search.clear();
        assert_eq!(search.query(), "");
    }
}
