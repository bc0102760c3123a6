//! The `readscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("readscore.toml").exists() {
        println!("readscore.toml already exists, skipping.");
    } else {
        std::fs::write("readscore.toml", SAMPLE_CONFIG)?;
        println!("Created readscore.toml");
    }

    println!("\nNext steps:");
    println!("  1. Save a passage to passage.txt");
    println!("  2. Run: readscore read --passage passage.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# readscore configuration

# Questions per quiz.
question_count = 4

# Readings shorter than this have no defined rate.
min_reading_secs = 3.0

# Uncomment for reproducible quizzes.
# seed = 42

[falsification]
# "content-check": only falsify sentences with a copula, a digit or a known adjective.
# "coin-flip": falsify with the given probability regardless of content.
policy = "content-check"
# probability = 0.5

[strategies]
# "priority", "random" or "shuffled"
selection = "priority"
order = ["antonym", "numeric", "negation"]
numeric_increments = [1, 2, 3, 5, 10]
builtin_antonyms = true

[antonyms]
# Extra entries overwrite built-in ones.
# scarce = "plentiful"
"#;
