use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    Gitee,
    GitHub,
}

impl RemoteKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            RemoteKind::Gitee => "Gitee",
            RemoteKind::GitHub => "GitHub",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub kind: RemoteKind,
    pub url: String,
}

impl Remote {
    pub fn new(kind: RemoteKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.display_name(), self.url)
    }
}

/// The two push targets, always pushed in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePair {
    pub first: Remote,
    pub second: Remote,
}

impl RemotePair {
    pub fn new(gitee_url: impl Into<String>, github_url: impl Into<String>) -> Self {
        Self {
            first: Remote::new(RemoteKind::Gitee, gitee_url),
            second: Remote::new(RemoteKind::GitHub, github_url),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Remote> {
        [&self.first, &self.second].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_gitee_before_github() {
        let pair = RemotePair::new("https://gitee.com/a/b.git", "https://github.com/a/b.git");
        let kinds: Vec<_> = pair.iter().map(|remote| remote.kind).collect();
        assert_eq!(kinds, vec![RemoteKind::Gitee, RemoteKind::GitHub]);
    }

    #[test]
    fn displays_remote_with_url() {
        let remote = Remote::new(RemoteKind::GitHub, "git@github.com:a/b.git");
        assert_eq!(remote.to_string(), "GitHub (git@github.com:a/b.git)");
    }
}
