use serde::Deserialize;
use services::student::{CreateStudent, UpdateStudent};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "roll_no must be 1-50 characters"))]
    pub roll_no: String,

    #[validate(length(min = 1, max = 100, message = "department must be 1-100 characters"))]
    pub department: String,
}

impl From<CreateStudentRequest> for CreateStudent {
    fn from(req: CreateStudentRequest) -> Self {
        Self {
            name: req.name,
            roll_no: req.roll_no,
            department: req.department,
        }
    }
}

/// Omitted fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "roll_no must be 1-50 characters"))]
    pub roll_no: Option<String>,

    #[validate(length(min = 1, max = 100, message = "department must be 1-100 characters"))]
    pub department: Option<String>,
}

impl From<UpdateStudentRequest> for UpdateStudent {
    fn from(req: UpdateStudentRequest) -> Self {
        Self {
            name: req.name,
            roll_no: req.roll_no,
            department: req.department,
        }
    }
}
