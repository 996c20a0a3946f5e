use crc32fast::Hasher;

/// Generate a page seed from its slug using CRC32
pub fn get_page_seed(slug: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(slug.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for blocks within a page
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(slug: &str) -> Self {
        Self {
            seed: get_page_seed(slug),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential ID, prefixed with a tag
    /// (e.g. `hero-3af91c2b-4`)
    pub fn new_id(&mut self, tag: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", tag, self.seed, self.count)
    }

    /// Resume counting past ids already present on a page, so freshly
    /// generated ids never collide with persisted ones.
    pub fn resume_after<'a, I: IntoIterator<Item = &'a str>>(&mut self, existing: I) {
        for id in existing {
            if let Some(rest) = id.rsplit('-').next() {
                if let Ok(n) = rest.parse::<u32>() {
                    self.count = self.count.max(n);
                }
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
