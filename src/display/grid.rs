use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::catalog::DogRecord;
use crate::favorites::FavoritesSet;

use super::favorite_label;

/// A row in the result grid
#[derive(Tabled)]
struct DogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Favorite")]
    favorite: &'static str,
    #[tabled(rename = "Image")]
    image: String,
}

/// Render dogs as a table, in the order given
pub fn format_dog_table(dogs: &[DogRecord], favorites: &FavoritesSet) -> String {
    let rows: Vec<DogRow> = dogs
        .iter()
        .map(|dog| DogRow {
            id: dog.id.clone(),
            name: dog.name.clone(),
            age: dog.age,
            breed: dog.breed.clone(),
            location: dog.zip_code.clone(),
            favorite: favorite_label(favorites.contains(&dog.id)),
            image: dog.img.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
