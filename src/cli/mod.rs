pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "gitapath")]
#[command(about = "Read the Bhagavad Gita from the terminal", long_about = None)]
pub struct Cli {
    /// Maximum concurrent verse requests (overrides the config file)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all chapters
    Chapters,
    /// Show one chapter's summary
    Chapter {
        /// Chapter number (1-18)
        number: u8,
    },
    /// Print every verse of a chapter
    Verses {
        /// Chapter number (1-18)
        chapter: u8,
    },
    /// Show a single verse with translations and commentaries
    Verse {
        chapter: u8,
        verse: u16,

        #[arg(long, value_enum, default_value_t = VerseFormat::Full)]
        format: VerseFormat,
    },
    /// Show a random verse
    Random,
    /// Show the verse of the day
    Daily {
        #[arg(long, value_enum, default_value_t = VerseFormat::Full)]
        format: VerseFormat,
    },
    /// Toggle a bookmark on a verse
    Bookmark {
        chapter: u8,
        verse: u16,
    },
    /// List bookmarked verses
    Bookmarks {
        /// Fetch and print the full text of each bookmarked verse
        #[arg(long)]
        resolve: bool,
    },
    /// Search verse text and translations
    Search {
        query: String,

        /// Restrict the search to these chapters (repeatable)
        #[arg(long = "chapter", short = 'n')]
        chapters: Vec<u8>,
    },
}

/// How a single verse is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerseFormat {
    /// Shloka, translations and commentaries
    Full,
    /// Shloka and citation, for sharing
    Share,
    /// Shloka, transliteration, primary translation and citation
    Copy,
}
