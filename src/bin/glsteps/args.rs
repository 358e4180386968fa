use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use glsteps::lesson::Lesson;

#[derive(Debug, Parser)]
pub struct Args {
    /// Tutorial step to run
    #[arg(value_enum, default_value_t = LessonArg::Colored)]
    pub lesson: LessonArg,
    /// Path to a json5 config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory with the lesson shaders, takes precedence over the config
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LessonArg {
    Triangle,
    Quad,
    Uniform,
    Debug,
    Colored,
}

impl From<LessonArg> for Lesson {
    fn from(l: LessonArg) -> Self {
        match l {
            LessonArg::Triangle => Self::Triangle,
            LessonArg::Quad => Self::Quad,
            LessonArg::Uniform => Self::Uniform,
            LessonArg::Debug => Self::Debug,
            LessonArg::Colored => Self::Colored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["glsteps"]).unwrap();

        assert_eq!(Lesson::from(args.lesson), Lesson::Colored);
        assert!(args.config.is_none());
        assert!(args.shader_dir.is_none());
    }

    #[test]
    fn lesson_and_overrides() {
        let args = Args::try_parse_from([
            "glsteps",
            "debug",
            "--config",
            "glsteps.json5",
            "--shader-dir",
            "shaders",
        ])
        .unwrap();

        assert_eq!(Lesson::from(args.lesson), Lesson::Debug);
        assert_eq!(args.config, Some(PathBuf::from("glsteps.json5")));
        assert_eq!(args.shader_dir, Some(PathBuf::from("shaders")));
    }

    #[test]
    fn unknown_lesson() {
        assert!(Args::try_parse_from(["glsteps", "cube"]).is_err());
    }
}
