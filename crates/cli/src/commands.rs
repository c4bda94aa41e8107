use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Stream-load the rows of a delimited file into the configured table
    Load {
        #[arg(long, help = "Stream load config file path (JSON)")]
        config: String,

        #[arg(long, help = "Delimited input file, one record per line")]
        input: String,

        #[arg(long, help = "Optional .env file consulted for STARROCKS_PASSWORD")]
        env_file: Option<String>,

        #[arg(long, default_value = ",", help = "Input field delimiter")]
        delimiter: String,

        #[arg(long, help = "Treat the first input line as data, not a header")]
        no_header: bool,

        #[arg(long, default_value_t = 0)]
        task_index: usize,

        #[arg(long, default_value_t = 1)]
        total_tasks: usize,
    },
    /// Validate a config file and print the load URL it resolves to
    Check {
        #[arg(long, help = "Stream load config file path (JSON)")]
        config: String,

        #[arg(long)]
        env_file: Option<String>,
    },
}
