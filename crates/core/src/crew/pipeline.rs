//! # Pipeline Progress
//!
//! Tracks how far a sequential run has come.

use serde::{Deserialize, Serialize};

/// Stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "index")]
pub enum PipelineStage {
    /// Running the task at this position
    Running(usize),
    /// Complete
    Complete,
    /// Failed
    Failed,
}

/// The pipeline state machine
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Current stage
    pub stage: PipelineStage,
    /// Number of tasks in the run
    pub total: usize,
}

impl Pipeline {
    /// Create a pipeline over `total` tasks
    pub fn new(total: usize) -> Self {
        let stage = if total == 0 {
            PipelineStage::Complete
        } else {
            PipelineStage::Running(0)
        };
        Self { stage, total }
    }

    /// Index of the task currently running
    pub fn current(&self) -> Option<usize> {
        match self.stage {
            PipelineStage::Running(index) => Some(index),
            _ => None,
        }
    }

    /// Advance to the next task
    pub fn advance(&mut self) {
        self.stage = match self.stage {
            PipelineStage::Running(index) if index + 1 < self.total => {
                PipelineStage::Running(index + 1)
            }
            PipelineStage::Running(_) => PipelineStage::Complete,
            PipelineStage::Complete => PipelineStage::Complete,
            PipelineStage::Failed => PipelineStage::Failed,
        };
    }

    /// Fail the pipeline
    pub fn fail(&mut self) {
        self.stage = PipelineStage::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_advance() {
        let mut pipeline = Pipeline::new(3);
        assert_eq!(pipeline.current(), Some(0));

        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Running(1));

        pipeline.advance();
        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Complete);

        // Terminal stages stay put
        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Complete);
    }

    #[test]
    fn test_pipeline_fail() {
        let mut pipeline = Pipeline::new(3);
        pipeline.advance();
        pipeline.fail();
        assert_eq!(pipeline.stage, PipelineStage::Failed);
        assert_eq!(pipeline.current(), None);

        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Failed);
    }

    #[test]
    fn test_empty_pipeline_is_complete() {
        assert_eq!(Pipeline::new(0).stage, PipelineStage::Complete);
    }
}
