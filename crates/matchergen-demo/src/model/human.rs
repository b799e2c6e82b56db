/// A person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Human {
    name: String,
    age: u32,
}

impl Human {
    /// Creates a person.
    #[must_use]
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }

    /// Given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Changes the name.
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Ages the person by one year and returns the new age.
    pub fn birthday(&mut self) -> u32 {
        self.age = self.next_age();
        self.age
    }

    fn next_age(&self) -> u32 {
        self.age.saturating_add(1)
    }
}
