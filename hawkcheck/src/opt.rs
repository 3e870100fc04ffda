use clap::Parser;

#[derive(Clone, Debug, Parser)]
/// Replay proof sessions with strategy-based proof search
pub struct Opt {
    /// Maximal number of goals being proved at the same time
    ///
    /// Every strategy that proves a subgoal increases the number of
    /// goals being proved.
    /// If this option is not given, the search is bounded only
    /// by the detection of cyclic goals.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Print the goal of every session and exit
    #[arg(long)]
    pub list: bool,

    /// Print every proved theorem
    #[arg(long)]
    pub echo: bool,

    /// Sessions to replay (all if none given)
    #[arg(name = "SESSION")]
    pub sessions: Vec<String>,
}
