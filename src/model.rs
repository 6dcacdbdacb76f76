use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub material_type: Option<String>,
    pub trade_type: Option<String>,
    pub price: f64,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub seller_name: String,
    pub seller_email: String,
}

/// Payload accepted by `POST /books`. Optional fields left out of the
/// request body are stored as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub material_type: Option<String>,
    #[serde(default)]
    pub trade_type: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub seller_name: String,
    pub seller_email: String,
}

impl NewBook {
    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            genre: self.genre,
            material_type: self.material_type,
            trade_type: self.trade_type,
            price: self.price,
            condition: self.condition,
            description: self.description,
            image_url: self.image_url,
            seller_name: self.seller_name,
            seller_email: self.seller_email,
        }
    }
}
