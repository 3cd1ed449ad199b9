pub mod company;
pub mod country;
pub mod resume;
pub mod salary;
pub mod specialist;
pub mod specialist_technology;
pub mod technology;
pub mod token;
pub mod town;
pub mod vacancy;
