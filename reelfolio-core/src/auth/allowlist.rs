use std::collections::BTreeSet;

/// Lower-cased admin emails. An empty list admits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowlist {
    emails: BTreeSet<String>,
}

impl AdminAllowlist {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Parse the comma-separated `ADMIN_EMAILS` form.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn allows(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        !email.is_empty() && self.emails.contains(&email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let list = AdminAllowlist::from_csv(" Ana@Example.com , ,ops@example.com");
        assert_eq!(list.len(), 2);
        assert!(list.allows("ana@example.com"));
        assert!(list.allows(" OPS@example.COM "));
        assert!(!list.allows("intruder@example.com"));
        assert!(!list.allows(""));
    }

    #[test]
    fn empty_list_admits_nobody() {
        let list = AdminAllowlist::from_csv("");
        assert!(list.is_empty());
        assert!(!list.allows("ana@example.com"));
    }
}
