// Application layer - Use case interactors

pub mod container;
pub mod dependency_interactor;
pub mod generate_interactor;
pub mod inspect_interactor;
pub mod replace_interactor;
pub mod report;
pub mod verify_interactor;

// Re-export interactors
pub use dependency_interactor::DependencyInteractor;
pub use generate_interactor::GenerateInteractor;
pub use inspect_interactor::InspectInteractor;
pub use replace_interactor::ReplaceInteractor;
pub use verify_interactor::VerifyInteractor;
