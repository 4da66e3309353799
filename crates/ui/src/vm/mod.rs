mod survey_vm;

pub use survey_vm::{OptionVm, SurveyOutcome, SurveyPhase, SurveyVm, start_survey};
