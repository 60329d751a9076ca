//! `vg completions <shell>`.

use clap::CommandFactory;
use clap_complete::Shell;

pub fn run_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    clap_complete::generate(shell, &mut cmd, "vg", &mut std::io::stdout());
}
