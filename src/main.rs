use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake24::game::GameConfig;
use snake24::modes::HumanMode;
use snake24::storage::HighScoreStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake24")]
#[command(version, about = "Snake game with make-24 arithmetic puzzles")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Side length of the square grid
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(4..))]
    grid_size: u16,

    /// Seconds allowed per puzzle
    #[arg(long, default_value = "120")]
    question_time: u32,

    /// Where the high score is stored
    #[arg(long, default_value = "snake24_highscore.json")]
    high_score_file: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Human,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_size: usize::from(cli.grid_size),
        question_time_secs: cli.question_time,
        ..Default::default()
    };
    let store = HighScoreStore::new(cli.high_score_file);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, store)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_grid_sizes_rejected_on_cli() {
        assert!(Cli::try_parse_from(["snake24", "--grid-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["snake24", "--grid-size", "1"]).is_err());
        assert!(Cli::try_parse_from(["snake24", "--grid-size", "3"]).is_err());
    }

    #[test]
    fn test_playable_grid_sizes_accepted() {
        let cli = Cli::try_parse_from(["snake24", "--grid-size", "4"]).unwrap();
        assert_eq!(cli.grid_size, 4);

        let cli = Cli::try_parse_from(["snake24"]).unwrap();
        assert_eq!(cli.grid_size, 20);
    }
}
