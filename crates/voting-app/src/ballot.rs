//! The ballot offered through the action endpoint.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Candidate name as registered on-chain; also the `candidate` query value.
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub label: &'static str,
    pub choices: &'static [Choice],
}

impl Ballot {
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == id)
    }
}

pub const BIRYANI: Ballot = Ballot {
    icon: "https://www.licious.in/blog/wp-content/uploads/2022/06/chicken-hyderabadi-biryani-01.jpg",
    title: "Vote for the best Biryani",
    description: "Vote for the best Biryani in the world (HYD ofc)",
    label: "Vote",
    choices: &[
        Choice {
            id: "hyd",
            label: "Vote for Hyderabadi Biryani",
        },
        Choice {
            id: "luck",
            label: "Vote for Lucknowi Biryani",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use voting_client::states::MAX_CANDIDATE_NAME_LEN;

    #[test]
    fn lookup_is_exact() {
        assert_eq!(BIRYANI.choice("hyd").map(|c| c.id), Some("hyd"));
        assert_eq!(BIRYANI.choice("luck").map(|c| c.id), Some("luck"));
        assert!(BIRYANI.choice("HYD").is_none());
        assert!(BIRYANI.choice("").is_none());
    }

    #[test]
    fn choice_ids_fit_candidate_accounts() {
        assert!(BIRYANI
            .choices
            .iter()
            .all(|c| !c.id.is_empty() && c.id.len() <= MAX_CANDIDATE_NAME_LEN));
    }
}
