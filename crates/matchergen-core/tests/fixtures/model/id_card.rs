pub struct IdCard {
    first_name: String,
    id: Uuid,
    nickname: Option<String>,
}

impl IdCard {
    pub fn first_name(&self) -> String {
        self.first_name.clone()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn into_first_name(self) -> String {
        self.first_name
    }
}

#[cfg(feature = "nicknames")]
impl IdCard {
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }
}
