use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[clap(name = "bibliotek", about = "Book catalog service")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP catalog service
    Serve {
        /// Path to a TOML settings file; environment variables override it
        #[clap(long)]
        config: Option<PathBuf>,
    },
    /// Query Open Library directly and print what enrichment would see
    Search {
        /// Book title
        title: String,
        /// Narrow the search by author
        #[clap(long)]
        author: Option<String>,
    },
}
