use crate::domain::diagnosis::ports::{FlagLog, ImageEncoder, VisionClient};

/// Holds the collaborators the diagnosis pipeline runs against.
#[derive(Clone)]
pub struct Service<IE, VC, FL>
where
    IE: ImageEncoder,
    VC: VisionClient,
    FL: FlagLog,
{
    pub image_encoder: IE,
    pub vision_client: VC,
    pub flag_log: FL,
    pub model: String,
}

impl<IE, VC, FL> Service<IE, VC, FL>
where
    IE: ImageEncoder,
    VC: VisionClient,
    FL: FlagLog,
{
    pub fn new(image_encoder: IE, vision_client: VC, flag_log: FL, model: String) -> Self {
        Self {
            image_encoder,
            vision_client,
            flag_log,
            model,
        }
    }
}
