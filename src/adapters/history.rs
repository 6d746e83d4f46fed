use crate::domain::ports::Navigator;
use crate::utils::error::Result;
use url::Url;

/// Session history kept in memory. Pushing drops any forward entries.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Url>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(url: Url) -> Self {
        Self {
            entries: vec![url],
            index: 0,
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Url] {
        &self.entries
    }

    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> &Url {
        &self.entries[self.index]
    }

    fn push_state(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }
}
