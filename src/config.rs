use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::network::parameters::{NetworkParameters, ParameterFiles};

/// Where to find the six trained parameter files.
///
/// Shared by both binaries; flatten it into a `clap::Parser`.
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// Directory holding the parameter files.
    #[clap(long, env = "DIGIT_PARAMS_DIR", default_value = ".")]
    pub params_dir: PathBuf,
    /// Load a single JSON bundle instead; takes precedence over the text files.
    #[clap(long, env = "DIGIT_PARAMS_JSON")]
    pub params_json: Option<PathBuf>,
    /// File name of W1 inside the parameter directory.
    #[clap(long, default_value = "w1new.txt")]
    pub w1: String,
    #[clap(long, default_value = "b1new.txt")]
    pub b1: String,
    #[clap(long, default_value = "w2new.txt")]
    pub w2: String,
    #[clap(long, default_value = "b2new.txt")]
    pub b2: String,
    #[clap(long, default_value = "w3new.txt")]
    pub w3: String,
    #[clap(long, default_value = "b3new.txt")]
    pub b3: String,
}

impl ParamArgs {
    pub fn files(&self) -> ParameterFiles {
        ParameterFiles {
            w1: self.w1.clone(),
            b1: self.b1.clone(),
            w2: self.w2.clone(),
            b2: self.b2.clone(),
            w3: self.w3.clone(),
            b3: self.b3.clone(),
        }
    }

    pub fn load(&self) -> Result<NetworkParameters> {
        match &self.params_json {
            Some(path) => NetworkParameters::load_json(path),
            None => NetworkParameters::load_dir(&self.params_dir, &self.files()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[clap(flatten)]
        params: ParamArgs,
    }

    #[test]
    fn defaults_match_the_shipped_file_names() {
        let cli = Cli::parse_from(["test"]);
        assert_eq!(cli.params.files(), ParameterFiles::default());
        assert!(cli.params.params_json.is_none());
    }

    #[test]
    fn individual_files_can_be_overridden() {
        let cli = Cli::parse_from(["test", "--params-dir", "/tmp/model", "--w3", "out.txt"]);
        assert_eq!(cli.params.params_dir, PathBuf::from("/tmp/model"));
        assert_eq!(cli.params.files().w3, "out.txt");
        assert_eq!(cli.params.files().w1, "w1new.txt");
    }
}
