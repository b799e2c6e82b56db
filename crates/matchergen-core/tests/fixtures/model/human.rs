pub struct Human {
    name: String,
    age: u32,
}

impl Human {
    pub fn new(name: &str, age: u32) -> Self {
        Self { name: name.to_string(), age }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}
