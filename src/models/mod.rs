use serde::{Deserialize, Serialize};

pub mod admin;
pub mod club;
pub mod enrollment;
pub mod event;
pub mod faculty;
pub mod guest;
pub mod session;
pub mod student;

/// Every role an account can carry. Stored on the account document and on
/// the session that authenticates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "faculty")]
    Faculty,
    #[serde(rename = "club-coordinator")]
    ClubCoordinator,
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "studentIntra")]
    StudentIntra,
    #[serde(rename = "guest")]
    Guest,
    #[serde(rename = "enrolled-student")]
    EnrolledStudent,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "secretary")]
    Secretary,
    #[serde(rename = "A-secretary")]
    AdditionalSecretary,
    #[serde(rename = "J-secretary")]
    JointSecretary,
}

/// The club positions a coordinator can hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "secretary")]
    Secretary,
    #[serde(rename = "A-secretary")]
    AdditionalSecretary,
    #[serde(rename = "J-secretary")]
    JointSecretary,
}

impl From<Position> for Role {
    fn from(position: Position) -> Self {
        match position {
            Position::Member => Role::Member,
            Position::Secretary => Role::Secretary,
            Position::AdditionalSecretary => Role::AdditionalSecretary,
            Position::JointSecretary => Role::JointSecretary,
        }
    }
}
