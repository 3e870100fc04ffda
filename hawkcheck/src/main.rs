//! Replay proof sessions with strategy-based proof search.

use clap::Parser;
use hawk::Workspace;
use hawkcheck::session::SESSIONS;
use hawkcheck::{Error, Opt, Session};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();

    let sessions: Vec<&Session> = if opt.sessions.is_empty() {
        SESSIONS.iter().collect()
    } else {
        let found = opt.sessions.iter().map(|name| Session::find(name));
        found.collect::<Result<Vec<_>, _>>()?
    };

    for session in sessions {
        // every session starts from a fresh workspace
        let mut ws = Workspace::new();
        ws.max_depth = opt.max_depth;
        if opt.list {
            println!("{}: {}", session.name, session.goal(&ws)?);
            continue;
        }
        let thm = session.run(&mut ws)?;
        log::info!("Proved {}", thm);
        if opt.echo {
            println!("{}: {}", session.name, thm);
        }
    }
    Ok(())
}
