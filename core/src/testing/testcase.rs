use crate::problem::ProblemSpec;

/// One execution of the script under check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testcase {
    pub name: String,
    pub params: Vec<String>,
    /// `None` means the output is shown but not judged.
    pub expected: Option<String>,
}

impl Testcase {
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
        expected: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            expected,
        }
    }

    /// Cases in file order. A spec without cases still yields a single
    /// zero-argument testcase, judged against the bare answer if there is one.
    pub fn enumerate(spec: &ProblemSpec) -> Vec<Self> {
        if !spec.cases.is_empty() {
            return spec
                .cases
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    Self::new(
                        format!("case {}", i + 1),
                        c.params.iter().cloned(),
                        Some(c.expected.clone()),
                    )
                })
                .collect();
        }

        let no_params: [String; 0] = [];
        if spec.bare_answer.is_empty() {
            vec![Self::new("run", no_params, None)]
        } else {
            vec![Self::new("answer", no_params, Some(spec.bare_answer.clone()))]
        }
    }
}
