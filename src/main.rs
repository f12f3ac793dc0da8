use log::{debug, error};
use recipe_ingest::{
    build_shopping_list, IngestConfig, RecipeImporter, StoredRecipe, TranslationCache,
};
use std::env;
use std::io::Read;

const USAGE: &str = "Usage:
  recipe-ingest url <URL>
  recipe-ingest text <FILE|->
  recipe-ingest shop <RECIPES.json> <ID>...
  recipe-ingest translate <LANG> <TEXT>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = args.split_first().ok_or(USAGE)?;
    let config = IngestConfig::load()?;
    debug!("{:?}", config);

    match command.as_str() {
        "url" => {
            let url = rest.first().ok_or(USAGE)?;
            let result = RecipeImporter::builder()
                .config(config)
                .url(url)
                .build()
                .await;
            match result {
                Ok(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
                Err(e) => {
                    error!("Import failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        "text" => {
            let path = rest.first().ok_or(USAGE)?;
            let text = if path == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                tokio::fs::read_to_string(path).await?
            };
            let recipe = RecipeImporter::builder()
                .config(config)
                .text(text)
                .build()
                .await?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        "shop" => {
            let (path, ids) = rest.split_first().ok_or(USAGE)?;
            let json = tokio::fs::read_to_string(path).await?;
            let recipes: Vec<StoredRecipe> = serde_json::from_str(&json)?;
            let list = build_shopping_list(ids, &recipes);
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        "translate" => {
            let lang = rest.first().ok_or(USAGE)?;
            let text = rest[1..].join(" ");
            let cache = TranslationCache::from_config(&config.translation, config.timeout())?;
            println!("{}", cache.translate(&text, lang).await);
            cache.flush()?;
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
