use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "mihrab",
    version,
    author,
    about = "Generate monthly mosque prayer schedules with configurable Iqamah times"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup wizard (mosque profile, location, calculation method)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Generate the schedule for a month (defaults to the current month)
    Generate {
        /// Month number 1-12
        #[arg(long)]
        month: Option<u32>,
        /// Four-digit year
        #[arg(long)]
        year: Option<i32>,
        /// Emit the resolved month as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Override the saved Iqamah display policy: every-day or midpoint
        #[arg(long)]
        policy: Option<String>,
    },
    /// Iqamah schedule management
    Iqamah {
        #[command(subcommand)]
        action: IqamahCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum IqamahCommands {
    /// Show the configured rules for every prayer
    List,
    /// Add a rule covering a span of days (exactly one of --time / --offset)
    Add {
        /// Prayer name (fajr, zuhr, asr, maghrib, isha)
        prayer: String,
        /// First day of month the rule covers
        #[arg(long)]
        from: u8,
        /// Last day of month the rule covers
        #[arg(long)]
        to: u8,
        /// Fixed congregation time, e.g. "6:15 am"
        #[arg(long)]
        time: Option<String>,
        /// Minutes after the calculated prayer time
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Edit a rule in place; --time / --offset also switches its kind
    Update {
        /// Prayer name
        prayer: String,
        /// Rule index as shown by `iqamah list`
        index: usize,
        #[arg(long)]
        from: Option<u8>,
        #[arg(long)]
        to: Option<u8>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Remove a rule
    Remove {
        /// Prayer name
        prayer: String,
        /// Rule index as shown by `iqamah list`
        index: usize,
    },
    /// Remove every rule for one prayer, or for all prayers
    Clear {
        /// Prayer name; omit to clear everything
        prayer: Option<String>,
    },
    /// Switch how resolved times are printed: every-day or midpoint
    Policy {
        policy: String,
    },
}
