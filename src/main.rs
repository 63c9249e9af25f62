use anyhow::Context;
use clap::Parser;
use log::info;

use saxpy::{
    Args, KernelConfig, KernelRunner, ThreadCount,
    report::{self, dump_vector},
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config().context("invalid configuration")?;

    if args.sweep {
        for threads in ThreadCount::ALL {
            run(&args, config.with_threads(threads))?;
        }
    } else {
        run(&args, config)?;
    }

    Ok(())
}

fn run(args: &Args, config: KernelConfig) -> anyhow::Result<()> {
    let runner = KernelRunner::seeded(config).context("failed to initialize the vectors")?;

    if !args.json {
        println!("{}", report::params_line(runner.config()));
    }

    if args.dump {
        let store = runner.store();
        println!("{}", dump_vector("vector X", store.x()));
        println!("{}", dump_vector("vector Y", store.y()));
        println!("a= {:.6}", store.a());
    }

    let outcome = runner.run().context("kernel run failed")?;
    info!(threads = outcome.threads.get(); "kernel finished");

    if args.dump {
        println!("{}", dump_vector("RES: final vector Y", outcome.store.y()));
    }

    let report = outcome.report();
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
