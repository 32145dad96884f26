//! Which sprite each event ID draws and how it sits in the world.

/// How an event is drawn when it has no dedicated sprite treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawFlag {
    /// Draw the sprite itself, at the given opacity (0-100).
    Opacity(u8),
    /// Draw a 15-ammo crate with the sprite shrunk onto it as an emblem.
    Crate,
    /// Draw a powerup monitor with the sprite shrunk onto its screen.
    Monitor,
}

/// Static rendering info for one event ID.
#[derive(Clone, Copy, Debug)]
pub struct EventInfo {
    /// Animation library file the sprite lives in.
    pub library: &'static str,
    pub set: usize,
    pub anim: usize,
    /// Dropped onto the nearest mask below when rendered.
    pub feels_gravity: bool,
    /// Floating pickup: bobs and alternates facing in a checkerboard.
    pub is_pickup: bool,
    /// Position off the hotspot rather than the coldspot after gravity.
    pub use_hotspot: bool,
    /// Centre on the tile even when not a pickup.
    pub always_adjust: bool,
    pub draw: DrawFlag,
    pub name: &'static str,
}

const fn info(
    library: &'static str,
    set: usize,
    anim: usize,
    feels_gravity: bool,
    is_pickup: bool,
    use_hotspot: bool,
    always_adjust: bool,
    draw: DrawFlag,
    name: &'static str,
) -> EventInfo {
    EventInfo {
        library,
        set,
        anim,
        feels_gravity,
        is_pickup,
        use_hotspot,
        always_adjust,
        draw,
        name,
    }
}

use DrawFlag::{Crate, Monitor, Opacity};

const ANIMS: &str = "Anims.j2a";
const PLUS: &str = "Plus.j2a";

/// Every event ID the renderer knows how to draw. IDs missing from this
/// table are invisible during normal play and are skipped. IDs 300 and up
/// are meta entries that only appear as redirect targets; 500 and up are
/// custom weapons, three entries per weapon (pickup, crate, powerup).
#[rustfmt::skip]
static EVENT_TABLE: &[(u16, EventInfo)] = &[
    (29, info(ANIMS, 55, 12, false, false, false, false, Opacity(100), "Jazz Level Start")),
    (30, info(ANIMS, 89, 12, false, false, false, false, Opacity(100), "Spaz Level Start")),
    (31, info(ANIMS, 89, 12, false, false, false, false, Opacity(100), "Multiplayer Level Start")),
    (32, info(ANIMS, 61, 12, false, false, false, false, Opacity(100), "Lori Level Start")),
    (33, info(ANIMS, 0, 29, false, true, false, false, Opacity(100), "Freezer Ammo+3")),
    (34, info(ANIMS, 0, 25, false, true, false, false, Opacity(100), "Bouncer Ammo+3")),
    (35, info(ANIMS, 0, 34, false, true, false, false, Opacity(100), "Seeker Ammo+3")),
    (36, info(ANIMS, 0, 49, false, true, false, false, Opacity(100), "3Way Ammo+3")),
    (37, info(ANIMS, 0, 57, false, true, false, false, Opacity(100), "Toaster Ammo+3")),
    (38, info(ANIMS, 0, 59, false, true, false, false, Opacity(100), "TNT Ammo+3")),
    (39, info(ANIMS, 0, 62, false, true, false, false, Opacity(100), "Gun8 Ammo+3")),
    (40, info(ANIMS, 0, 68, false, true, false, false, Opacity(100), "Gun9 Ammo+3")),
    (41, info(ANIMS, 103, 4, true, false, false, false, Opacity(100), "Still Turtleshell")),
    (42, info(ANIMS, 106, 1, false, false, false, false, Opacity(100), "Swinging Vine")),
    (43, info(ANIMS, 0, 1, false, false, false, false, Opacity(100), "Bomb")),
    (44, info(ANIMS, 71, 84, false, true, false, false, Opacity(100), "Silver Coin")),
    (45, info(ANIMS, 71, 37, false, true, false, false, Opacity(100), "Gold Coin")),
    (46, info(ANIMS, 71, 5, true, false, false, false, Opacity(100), "Gun crate")),
    (47, info(ANIMS, 71, 5, true, false, false, false, Opacity(100), "Carrot crate")),
    (48, info(ANIMS, 71, 5, true, false, false, false, Opacity(100), "1Up crate")),
    (49, info(ANIMS, 71, 3, true, false, false, false, Opacity(100), "Gem barrel")),
    (50, info(ANIMS, 71, 3, true, false, false, false, Opacity(100), "Carrot barrel")),
    (51, info(ANIMS, 71, 3, true, false, false, false, Opacity(100), "1up barrel")),
    (52, info(ANIMS, 71, 5, true, false, false, false, Opacity(100), "Bomb Crate")),
    (53, info(ANIMS, 71, 55, true, false, false, false, Opacity(100), "Freezer Ammo+15")),
    (54, info(ANIMS, 71, 54, true, false, false, false, Opacity(100), "Bouncer Ammo+15")),
    (55, info(ANIMS, 71, 56, true, false, false, false, Opacity(100), "Seeker Ammo+15")),
    (56, info(ANIMS, 71, 57, true, false, false, false, Opacity(100), "3Way Ammo+15")),
    (57, info(ANIMS, 71, 58, true, false, false, false, Opacity(100), "Toaster Ammo+15")),
    (58, info(ANIMS, 71, 90, false, false, false, false, Opacity(100), "TNT (armed explosive, no pickup)")),
    (59, info(ANIMS, 71, 36, false, true, false, false, Opacity(100), "Airboard")),
    (60, info(ANIMS, 96, 5, true, false, false, false, Opacity(100), "Frozen Green Spring")),
    (61, info(ANIMS, 71, 29, false, true, false, false, Opacity(100), "Gun Fast Fire")),
    (62, info(ANIMS, 71, 5, true, false, false, false, Opacity(100), "Spring Crate")),
    (63, info(ANIMS, 71, 22, false, true, false, false, Opacity(100), "Red Gem +1")),
    (64, info(ANIMS, 71, 22, false, true, false, false, Opacity(100), "Green Gem +1")),
    (65, info(ANIMS, 71, 22, false, true, false, false, Opacity(100), "Blue Gem +1")),
    (66, info(ANIMS, 71, 22, false, true, false, false, Opacity(100), "Purple Gem +1")),
    (67, info(ANIMS, 71, 34, false, false, false, false, Opacity(100), "Super Red Gem")),
    (68, info(ANIMS, 8, 3, true, false, false, false, Opacity(100), "Birdy")),
    (69, info(ANIMS, 71, 3, true, false, false, false, Opacity(100), "Gun Barrel")),
    (70, info(ANIMS, 71, 5, true, false, false, false, Opacity(100), "Gem Crate")),
    (71, info(ANIMS, 71, 70, true, false, false, false, Opacity(100), "Jazz<->Spaz")),
    (72, info(ANIMS, 71, 21, false, true, false, false, Opacity(100), "Carrot Energy +1")),
    (73, info(ANIMS, 71, 82, false, true, false, false, Opacity(100), "Full Energy")),
    (74, info(ANIMS, 71, 31, true, false, false, false, Opacity(100), "Fire Shield")),
    (75, info(ANIMS, 71, 10, true, false, false, false, Opacity(100), "Water Shield")),
    (76, info(ANIMS, 71, 51, true, false, false, false, Opacity(100), "Lightning Shield")),
    (79, info(ANIMS, 71, 33, false, true, false, false, Opacity(100), "Fast Feet")),
    (80, info(ANIMS, 71, 0, false, true, false, false, Opacity(100), "Extra Live")),
    (81, info(ANIMS, 71, 28, true, false, false, false, Opacity(100), "End of Level signpost")),
    (83, info(ANIMS, 71, 14, true, false, false, false, Opacity(100), "Save point signpost")),
    (84, info(ANIMS, 11, 0, true, false, false, false, Opacity(100), "Bonus Level signpost")),
    (85, info(ANIMS, 96, 7, true, false, false, false, Opacity(100), "Red Spring")),
    (86, info(ANIMS, 96, 5, true, false, false, false, Opacity(100), "Green Spring")),
    (87, info(ANIMS, 96, 0, true, false, false, false, Opacity(100), "Blue Spring")),
    (88, info(ANIMS, 71, 72, false, true, false, false, Opacity(100), "Invincibility")),
    (89, info(ANIMS, 71, 87, false, true, false, false, Opacity(100), "Extra Time")),
    (90, info(ANIMS, 71, 42, false, true, false, false, Opacity(100), "Freeze Enemies")),
    (91, info(ANIMS, 96, 8, false, false, false, false, Opacity(100), "Hor Red Spring")),
    (92, info(ANIMS, 96, 6, false, false, false, false, Opacity(100), "Hor Green Spring")),
    (93, info(ANIMS, 96, 1, false, false, false, false, Opacity(100), "Hor Blue Spring")),
    (95, info(ANIMS, 71, 52, true, false, false, false, Opacity(100), "Scenery Trigger Crate")),
    (96, info(ANIMS, 71, 40, false, true, false, false, Opacity(100), "Fly carrot")),
    (97, info(PLUS, 1, 2, false, true, false, false, Opacity(100), "Red RectGem +1")),
    (98, info(PLUS, 1, 2, false, true, false, false, Opacity(100), "Green RectGem +1")),
    (99, info(PLUS, 1, 2, false, true, false, false, Opacity(100), "Blue RectGem +1")),
    (100, info(ANIMS, 102, 0, true, false, false, false, Opacity(100), "Tuf Turt")),
    (101, info(ANIMS, 101, 5, true, false, false, false, Opacity(100), "Tuf Boss")),
    (102, info(ANIMS, 59, 2, true, false, false, false, Opacity(100), "Lab Rat")),
    (103, info(ANIMS, 32, 0, true, false, false, false, Opacity(100), "Dragon")),
    (104, info(ANIMS, 60, 4, true, false, false, false, Opacity(100), "Lizard")),
    (105, info(ANIMS, 15, 0, false, false, false, true, Opacity(100), "Bee")),
    (106, info(ANIMS, 76, 2, false, false, false, true, Opacity(66), "Rapier")),
    (107, info(ANIMS, 88, 0, false, false, false, true, Opacity(100), "Sparks")),
    (108, info(ANIMS, 1, 1, false, false, false, true, Opacity(100), "Bat")),
    (109, info(ANIMS, 99, 6, true, false, false, false, Opacity(100), "Sucker")),
    (110, info(ANIMS, 20, 0, false, false, false, true, Opacity(100), "Caterpillar")),
    (111, info(ANIMS, 18, 2, false, false, false, false, Opacity(100), "Cheshire1")),
    (112, info(ANIMS, 19, 2, false, false, false, false, Opacity(100), "Cheshire2")),
    (113, info(ANIMS, 52, 4, true, false, false, false, Opacity(100), "Hatter")),
    (114, info(ANIMS, 7, 4, true, false, false, false, Opacity(100), "Bilsy Boss")),
    (115, info(ANIMS, 83, 2, true, false, false, false, Opacity(100), "Skeleton")),
    (116, info(ANIMS, 29, 0, true, false, false, false, Opacity(100), "Doggy Dogg")),
    (117, info(ANIMS, 103, 7, true, false, false, false, Opacity(100), "Norm Turtle")),
    (118, info(ANIMS, 53, 0, true, false, false, false, Opacity(100), "Helmut")),
    (120, info(ANIMS, 24, 0, true, false, false, false, Opacity(100), "Demon")),
    (123, info(ANIMS, 31, 0, false, false, false, false, Opacity(100), "Dragon Fly")),
    (124, info(ANIMS, 67, 6, true, false, false, false, Opacity(100), "Monkey")),
    (125, info(ANIMS, 41, 1, true, false, false, false, Opacity(100), "Fat Chick")),
    (126, info(ANIMS, 42, 0, true, false, false, false, Opacity(100), "Fencer")),
    (127, info(ANIMS, 43, 0, false, false, false, false, Opacity(100), "Fish")),
    (128, info(ANIMS, 68, 3, true, false, false, false, Opacity(100), "Moth")),
    (129, info(ANIMS, 97, 0, true, false, false, false, Opacity(100), "Steam")),
    (130, info(ANIMS, 79, 0, false, false, false, true, Opacity(100), "Rotating Rock")),
    (131, info(ANIMS, 71, 60, true, false, false, false, Opacity(100), "Blaster PowerUp")),
    (132, info(ANIMS, 71, 61, true, false, false, false, Opacity(100), "Bouncy PowerUp")),
    (133, info(ANIMS, 71, 62, true, false, false, false, Opacity(100), "Ice gun PowerUp")),
    (134, info(ANIMS, 71, 63, true, false, false, false, Opacity(100), "Seek PowerUp")),
    (135, info(ANIMS, 71, 64, true, false, false, false, Opacity(100), "RF PowerUp")),
    (136, info(ANIMS, 71, 65, true, false, false, false, Opacity(100), "Toaster PowerUP")),
    (137, info(ANIMS, 72, 4, false, false, false, true, Opacity(100), "PIN: Left Paddle")),
    (138, info(ANIMS, 72, 5, false, false, false, true, Opacity(100), "PIN: Right Paddle")),
    (139, info(ANIMS, 72, 0, false, false, false, true, Opacity(100), "PIN: 500 Bump")),
    (140, info(ANIMS, 72, 2, false, false, false, true, Opacity(100), "PIN: Carrot Bump")),
    (141, info(ANIMS, 71, 1, false, true, false, false, Opacity(100), "Apple")),
    (142, info(ANIMS, 71, 2, false, true, false, false, Opacity(100), "Banana")),
    (143, info(ANIMS, 71, 16, false, true, false, false, Opacity(100), "Cherry")),
    (144, info(ANIMS, 71, 71, false, true, false, false, Opacity(100), "Orange")),
    (145, info(ANIMS, 71, 74, false, true, false, false, Opacity(100), "Pear")),
    (146, info(ANIMS, 71, 79, false, true, false, false, Opacity(100), "Pretzel")),
    (147, info(ANIMS, 71, 81, false, true, false, false, Opacity(100), "Strawberry")),
    (151, info(ANIMS, 71, 0, true, false, false, false, Opacity(100), "Queen Boss")),
    (152, info(ANIMS, 99, 4, false, false, false, false, Opacity(100), "Floating Sucker")),
    (153, info(ANIMS, 13, 0, false, false, false, false, Opacity(100), "Bridge")),
    (154, info(ANIMS, 71, 48, false, true, false, false, Opacity(100), "Lemon")),
    (155, info(ANIMS, 71, 50, false, true, false, false, Opacity(100), "Lime")),
    (156, info(ANIMS, 71, 89, false, true, false, false, Opacity(100), "Thing")),
    (157, info(ANIMS, 71, 92, false, true, false, false, Opacity(100), "Watermelon")),
    (158, info(ANIMS, 71, 73, false, true, false, false, Opacity(100), "Peach")),
    (159, info(ANIMS, 71, 38, false, true, false, false, Opacity(100), "Grapes")),
    (160, info(ANIMS, 71, 49, false, true, false, false, Opacity(100), "Lettuce")),
    (161, info(ANIMS, 71, 26, false, true, false, false, Opacity(100), "Eggplant")),
    (162, info(ANIMS, 71, 23, false, true, false, false, Opacity(100), "Cucumb")),
    (163, info(ANIMS, 71, 20, false, true, false, false, Opacity(100), "Soft Drink")),
    (164, info(ANIMS, 71, 75, false, true, false, false, Opacity(100), "Soda Pop")),
    (165, info(ANIMS, 71, 53, false, true, false, false, Opacity(100), "Milk")),
    (166, info(ANIMS, 71, 76, false, true, false, false, Opacity(100), "Pie")),
    (167, info(ANIMS, 71, 12, false, true, false, false, Opacity(100), "Cake")),
    (168, info(ANIMS, 71, 25, false, true, false, false, Opacity(100), "Donut")),
    (169, info(ANIMS, 71, 24, false, true, false, false, Opacity(100), "Cupcake")),
    (170, info(ANIMS, 71, 18, false, true, false, false, Opacity(100), "Chips")),
    (171, info(ANIMS, 71, 13, false, true, false, false, Opacity(100), "Candy")),
    (172, info(ANIMS, 71, 19, false, true, false, false, Opacity(100), "Chocbar")),
    (173, info(ANIMS, 71, 43, false, true, false, false, Opacity(100), "Icecream")),
    (174, info(ANIMS, 71, 11, false, true, false, false, Opacity(100), "Burger")),
    (175, info(ANIMS, 71, 77, false, true, false, false, Opacity(100), "Pizza")),
    (176, info(ANIMS, 71, 32, false, true, false, false, Opacity(100), "Fries")),
    (177, info(ANIMS, 71, 17, false, true, false, false, Opacity(100), "Chicken Leg")),
    (178, info(ANIMS, 71, 80, false, true, false, false, Opacity(100), "Sandwich")),
    (179, info(ANIMS, 71, 88, false, true, false, false, Opacity(100), "Taco")),
    (180, info(ANIMS, 71, 91, false, true, false, false, Opacity(100), "Weenie")),
    (181, info(ANIMS, 71, 39, false, true, false, false, Opacity(100), "Ham")),
    (182, info(ANIMS, 71, 15, false, true, false, false, Opacity(100), "Cheese")),
    (183, info(ANIMS, 60, 2, false, false, false, true, Opacity(100), "Float Lizard")),
    (184, info(ANIMS, 67, 2, true, false, false, false, Opacity(100), "Stand Monkey")),
    (190, info(ANIMS, 77, 1, false, false, false, true, Opacity(100), "Raven")),
    (191, info(ANIMS, 100, 0, true, false, false, false, Opacity(100), "Tube Turtle")),
    (192, info(ANIMS, 71, 35, false, false, false, true, Opacity(100), "Gem Ring")),
    (193, info(ANIMS, 84, 0, true, true, true, false, Opacity(100), "Small Tree")),
    (195, info(ANIMS, 105, 0, false, false, false, true, Opacity(100), "Uterus")),
    (196, info(ANIMS, 105, 7, true, false, false, false, Opacity(100), "Crab")),
    (197, info(ANIMS, 112, 0, false, false, false, false, Opacity(100), "Witch")),
    (198, info(ANIMS, 80, 1, false, false, false, true, Opacity(100), "Rocket Turtle")),
    (199, info(ANIMS, 14, 0, true, false, false, false, Opacity(100), "Bubba")),
    (200, info(ANIMS, 27, 8, true, false, false, false, Opacity(100), "Devil devan boss")),
    (201, info(ANIMS, 26, 1, false, false, false, false, Opacity(100), "Devan (robot boss)")),
    (202, info(ANIMS, 78, 3, false, false, false, false, Opacity(100), "Robot (robot boss)")),
    (203, info(ANIMS, 17, 0, true, true, true, false, Opacity(100), "Carrotus pole")),
    (204, info(ANIMS, 74, 0, true, true, true, false, Opacity(100), "Psych pole")),
    (205, info(ANIMS, 28, 0, true, true, true, false, Opacity(100), "Diamondus pole")),
    (209, info(ANIMS, 48, 0, false, false, false, false, Opacity(100), "Fruit Platform")),
    (210, info(ANIMS, 10, 0, false, false, false, false, Opacity(100), "Boll Platform")),
    (211, info(ANIMS, 51, 0, false, false, false, false, Opacity(100), "Grass Platform")),
    (212, info(ANIMS, 73, 0, false, false, false, false, Opacity(100), "Pink Platform")),
    (213, info(ANIMS, 87, 0, false, false, false, false, Opacity(100), "Sonic Platform")),
    (214, info(ANIMS, 95, 0, false, false, false, false, Opacity(100), "Spike Platform")),
    (215, info(ANIMS, 93, 0, false, false, false, false, Opacity(100), "Spike Boll")),
    (217, info(ANIMS, 38, 0, true, false, false, false, Opacity(100), "Eva")),
    (220, info(ANIMS, 71, 66, true, false, false, false, Opacity(100), "Gun8 Powerup")),
    (221, info(ANIMS, 71, 67, true, false, false, false, Opacity(100), "Gun9 Powerup")),
    (223, info(ANIMS, 93, 0, false, false, false, false, Opacity(100), "3D Spike Boll")),
    (226, info(ANIMS, 60, 3, false, false, false, true, Opacity(100), "Copter")),
    (227, info(PLUS, 2, 2, true, false, false, false, Opacity(100), "Laser Shield")),
    (228, info(ANIMS, 71, 87, false, true, false, false, Opacity(100), "Stopwatch")),
    (229, info(ANIMS, 58, 0, true, true, true, false, Opacity(100), "Jungle Pole")),
    (231, info(ANIMS, 5, 0, true, false, false, false, Opacity(100), "Big Rock")),
    (232, info(ANIMS, 4, 0, true, false, false, false, Opacity(100), "Big Box")),
    (235, info(ANIMS, 86, 2, false, false, false, false, Opacity(100), "Bolly Boss")),
    (236, info(ANIMS, 16, 0, false, false, false, true, Opacity(100), "Butterfly")),
    (237, info(ANIMS, 3, 0, false, false, false, true, Opacity(100), "BeeBoy")),
    (244, info(ANIMS, 44, 1, true, false, false, false, Opacity(100), "CTF Base + Flag")),
    (247, info(ANIMS, 113, 4, true, false, false, false, Opacity(100), "Xmas Bilsy Boss")),
    (248, info(ANIMS, 115, 7, true, false, false, false, Opacity(100), "Xmas Norm Turtle")),
    (249, info(ANIMS, 114, 4, true, false, false, false, Opacity(100), "Xmas Lizard")),
    (250, info(ANIMS, 114, 2, false, false, false, true, Opacity(100), "Xmas Float Lizard")),
    (251, info(ANIMS, 113, 0, true, false, false, false, Opacity(100), "Addon DOG")),
    (252, info(ANIMS, 116, 1, true, false, false, false, Opacity(100), "Addon Sparks")),
    (253, info(ANIMS, 117, 0, false, false, false, true, Opacity(100), "Blue Ghost")),
    (300, info(ANIMS, 71, 58, true, false, false, false, Opacity(100), "TNT Ammo+15")),
    (301, info(PLUS, 2, 0, true, false, false, false, Opacity(100), "Gun8 Ammo+15")),
    (302, info(PLUS, 2, 1, true, false, false, false, Opacity(100), "Gun9 Ammo+15")),
    (500, info("SEroller.j2a", 0, 0, false, true, false, false, Opacity(100), "Roller Ammo+3")),
    (501, info("SEroller.j2a", 0, 2, true, false, false, false, Opacity(100), "Roller Ammo+15")),
    (502, info("SEroller.j2a", 0, 3, true, false, false, false, Opacity(100), "Roller Powerup")),
    (510, info("SEfirework.j2a", 0, 0, false, true, false, false, Opacity(100), "Firework Ammo+3")),
    (511, info("SEfirework.j2a", 0, 2, true, false, false, false, Opacity(100), "Firework Ammo+15")),
    (512, info("SEfirework.j2a", 0, 3, true, false, false, false, Opacity(100), "Firework Powerup")),
    (520, info("SEenergyblast.j2a", 0, 0, false, true, false, false, Opacity(100), "Energy Blast Ammo+3")),
    (521, info("SEenergyblast.j2a", 0, 2, true, false, false, false, Opacity(100), "Energy Blast Ammo+15")),
    (522, info("SEenergyblast.j2a", 0, 3, true, false, false, false, Opacity(100), "Energy Blast Powerup")),
    (530, info("BubbleGun-mlle.j2a", 0, 0, false, true, false, false, Opacity(100), "Bubble Gun Ammo+3")),
    (531, info("BubbleGun-mlle.j2a", 0, 1, true, false, false, false, Opacity(100), "Bubble Gun Ammo+15")),
    (532, info("BubbleGun-mlle.j2a", 0, 2, true, false, false, false, Opacity(100), "Bubble Gun Powerup")),
    (540, info("CosmicDust.j2a", 0, 1, false, true, false, false, Opacity(100), "Cosmic Dust Ammo+3")),
    (541, info("CosmicDust.j2a", 0, 3, true, false, false, false, Opacity(100), "Cosmic Dust Ammo+15")),
    (542, info("CosmicDust.j2a", 0, 4, true, false, false, false, Opacity(100), "Cosmic Dust Powerup")),
    (550, info("dischargeGun.j2a", 0, 3, false, true, false, false, Opacity(100), "Discharge Gun Ammo+3")),
    (551, info("dischargeGun.j2a", 0, 3, true, false, false, false, Crate, "Discharge Gun Ammo+15")),
    (552, info("dischargeGun.j2a", 0, 4, true, false, false, false, Opacity(100), "Discharge Gun Powerup")),
    (560, info("flashbang.j2a", 0, 2, false, true, false, false, Opacity(100), "Flashbang Ammo+3")),
    (561, info("flashbang.j2a", 0, 2, true, false, false, false, Crate, "Flashbang Ammo+15")),
    (562, info("flashbang.j2a", 0, 3, true, false, false, false, Opacity(100), "Flashbang Powerup")),
    (570, info("FusionCannon.j2a", 0, 0, false, true, false, false, Opacity(100), "Fusion Cannon Ammo+3")),
    (571, info("FusionCannon.j2a", 0, 3, true, false, false, false, Opacity(100), "Fusion Cannon Ammo+15")),
    (572, info("FusionCannon.j2a", 0, 2, true, false, false, false, Opacity(100), "Fusion Cannon Powerup")),
    (580, info("LaserBlaster.j2a", 0, 2, false, true, false, false, Opacity(100), "Laser Blaster Ammo+3")),
    (581, info("LaserBlaster.j2a", 0, 2, true, false, false, false, Crate, "Laser Blaster Ammo+15")),
    (582, info("LaserBlaster.j2a", 0, 4, true, false, false, false, Opacity(100), "Laser Blaster Powerup")),
    (590, info("Lightningrod.j2a", 0, 0, false, true, false, false, Opacity(100), "Lightningrod Ammo+3")),
    (591, info("Lightningrod.j2a", 0, 5, true, false, false, false, Opacity(100), "Lightningrod Ammo+15")),
    (592, info("Lightningrod.j2a", 0, 0, true, false, false, false, Monitor, "Lightningrod Powerup")),
    (600, info("lockOnMissile.j2a", 0, 3, false, true, false, false, Opacity(100), "Lock-On Missile Ammo+3")),
    (601, info("lockOnMissile.j2a", 0, 3, true, false, false, false, Crate, "Lock-On Missile Ammo+15")),
    (602, info("lockOnMissile.j2a", 0, 5, true, false, false, false, Opacity(100), "Lock-On Missile Powerup")),
    (610, info("Meteor.j2a", 0, 1, false, true, false, false, Opacity(100), "Meteor Ammo+3")),
    (611, info("Meteor.j2a", 0, 3, true, false, false, false, Opacity(100), "Meteor Ammo+15")),
    (612, info("Meteor.j2a", 0, 4, true, false, false, false, Opacity(100), "Meteor Powerup")),
    (620, info("Mortar.j2a", 0, 1, false, true, false, false, Opacity(100), "Mortar Ammo+3")),
    (621, info("Mortar.j2a", 0, 4, true, false, false, false, Opacity(100), "Mortar Ammo+15")),
    (622, info("Mortar.j2a", 0, 5, true, false, false, false, Opacity(100), "Mortar Powerup")),
    (630, info("Nail.j2a", 0, 4, false, true, false, false, Opacity(100), "Nailgun Ammo+3")),
    (631, info("Nail.j2a", 0, 2, true, false, false, false, Opacity(100), "Nailgun Ammo+15")),
    (632, info("Nail.j2a", 0, 3, true, false, false, false, Opacity(100), "Nailgun Powerup")),
    (640, info("petrolBomb.j2a", 0, 3, false, true, false, false, Opacity(100), "Petrol Bomb Ammo+3")),
    (641, info("petrolBomb.j2a", 0, 3, true, false, false, false, Crate, "Petrol Bomb Ammo+15")),
    (642, info("petrolBomb.j2a", 0, 3, true, false, false, false, Monitor, "Petrol Bomb Powerup")),
    (650, info("sword.j2a", 0, 3, false, true, false, false, Opacity(100), "Sword Ammo+3")),
    (651, info("sword.j2a", 0, 3, true, false, false, false, Crate, "Sword Ammo+15")),
    (652, info("sword.j2a", 0, 3, true, false, false, false, Monitor, "Sword Powerup")),
    (660, info("Syringe.j2a", 0, 0, false, true, false, false, Opacity(100), "Syringe Ammo+3")),
    (661, info("Syringe.j2a", 0, 3, true, false, false, false, Opacity(100), "Syringe Ammo+15")),
    (662, info("Syringe.j2a", 0, 2, true, false, false, false, Opacity(100), "Syringe Powerup")),
    (670, info("TornadoGun.j2a", 0, 3, false, true, false, false, Opacity(100), "Tornado Gun Ammo+3")),
    (671, info("TornadoGun.j2a", 0, 5, true, false, false, false, Opacity(100), "Tornado Gun Ammo+15")),
    (672, info("TornadoGun.j2a", 0, 4, true, false, false, false, Opacity(100), "Tornado Gun Powerup")),
    (680, info("weaponVMega.j2a", 0, 1, false, true, false, false, Opacity(100), "Boomerang Ammo+3")),
    (681, info("weaponVMega.j2a", 0, 1, true, false, false, false, Crate, "Boomerang Ammo+15")),
    (682, info("weaponVMega.j2a", 0, 1, true, false, false, false, Monitor, "Boomerang Powerup")),
    (690, info("weaponVMega.j2a", 1, 6, false, true, false, false, Opacity(100), "Burrower Ammo+3")),
    (691, info("weaponVMega.j2a", 1, 6, true, false, false, false, Crate, "Burrower Ammo+15")),
    (692, info("weaponVMega.j2a", 1, 6, true, false, false, false, Monitor, "Burrower Powerup")),
    (700, info("weaponVMega.j2a", 2, 3, false, true, false, false, Opacity(100), "Ice Cloud Ammo+3")),
    (701, info("weaponVMega.j2a", 2, 3, true, false, false, false, Crate, "Ice Cloud Ammo+15")),
    (702, info("weaponVMega.j2a", 2, 3, true, false, false, false, Monitor, "Ice Cloud Powerup")),
    (710, info("weaponVMega.j2a", 3, 4, false, true, false, false, Opacity(100), "Pathfinder Ammo+3")),
    (711, info("weaponVMega.j2a", 3, 4, true, false, false, false, Crate, "Pathfinder Ammo+15")),
    (712, info("weaponVMega.j2a", 3, 4, true, false, false, false, Monitor, "Pathfinder Powerup")),
    (720, info("weaponVMega.j2a", 4, 2, false, true, false, false, Opacity(100), "Backfire Ammo+3")),
    (721, info("weaponVMega.j2a", 4, 2, true, false, false, false, Crate, "Backfire Ammo+15")),
    (722, info("weaponVMega.j2a", 4, 2, true, false, false, false, Monitor, "Backfire Powerup")),
    (730, info("weaponVMega.j2a", 5, 2, false, true, false, false, Opacity(100), "Crackerjack Ammo+3")),
    (731, info("weaponVMega.j2a", 5, 2, true, false, false, false, Crate, "Crackerjack Ammo+15")),
    (732, info("weaponVMega.j2a", 5, 2, true, false, false, false, Monitor, "Crackerjack Powerup")),
    (740, info("weaponVMega.j2a", 6, 1, false, true, false, false, Opacity(100), "Gravity Well Ammo+3")),
    (741, info("weaponVMega.j2a", 6, 1, true, false, false, false, Crate, "Gravity Well Ammo+15")),
    (742, info("weaponVMega.j2a", 6, 1, true, false, false, false, Monitor, "Gravity Well Powerup")),
    (750, info("weaponVMega.j2a", 7, 2, false, true, false, false, Opacity(100), "Voranj Ammo+3")),
    (751, info("weaponVMega.j2a", 7, 2, true, false, false, false, Crate, "Voranj Ammo+15")),
    (752, info("weaponVMega.j2a", 7, 2, true, false, false, false, Monitor, "Voranj Powerup")),
    (760, info("SmokeWopens.j2a", 0, 0, false, true, false, false, Opacity(100), "ELEKTREK SHIELD Ammo+3")),
    (761, info("SmokeWopens.j2a", 0, 0, true, false, false, false, Crate, "ELEKTREK SHIELD Ammo+15")),
    (762, info("SmokeWopens.j2a", 0, 0, true, false, false, false, Monitor, "ELEKTREK SHIELD Powerup")),
    (770, info("SmokeWopens.j2a", 1, 1, false, true, false, false, Opacity(100), "Zeus Artillery Ammo+3")),
    (771, info("SmokeWopens.j2a", 1, 1, true, false, false, false, Crate, "Zeus Artillery Ammo+15")),
    (772, info("SmokeWopens.j2a", 1, 1, true, false, false, false, Monitor, "Zeus Artillery Powerup")),
    (780, info("SmokeWopens.j2a", 2, 0, false, true, false, false, Opacity(100), "Phoenix Gun Ammo+3")),
    (781, info("SmokeWopens.j2a", 2, 0, true, false, false, false, Crate, "Phoenix Gun Ammo+15")),
    (782, info("SmokeWopens.j2a", 2, 0, true, false, false, false, Monitor, "Phoenix Gun Powerup")),
    (790, info("autoTurret.j2a", 0, 1, false, true, false, false, Opacity(100), "Auto-turret Ammo+3")),
    (791, info("autoTurret.j2a", 0, 1, true, false, false, false, Crate, "Auto-turret Ammo+15")),
    (792, info("autoTurret.j2a", 0, 1, true, false, false, false, Monitor, "Auto-turret Powerup")),
    (800, info("weaponVMega.j2a", 8, 4, false, true, false, false, Opacity(100), "Meteor V Ammo+3")),
    (801, info("weaponVMega.j2a", 8, 4, true, false, false, false, Crate, "Meteor V Ammo+15")),
    (802, info("weaponVMega.j2a", 8, 4, true, false, false, false, Monitor, "Meteor V Powerup")),
    (810, info("SEminimirv.j2a", 0, 0, false, true, false, false, Opacity(100), "Mini-MIRV Ammo+3")),
    (811, info("SEminimirv.j2a", 0, 2, true, false, false, false, Opacity(100), "Mini-MIRV Ammo+15")),
    (812, info("SEminimirv.j2a", 0, 3, true, false, false, false, Opacity(100), "Mini-MIRV Powerup")),
];

/// Rendering info for an event ID, or `None` if the event is invisible.
pub fn descriptor(code: u16) -> Option<&'static EventInfo> {
    EVENT_TABLE
        .binary_search_by_key(&code, |(id, _)| *id)
        .ok()
        .map(|i| &EVENT_TABLE[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(EVENT_TABLE.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn known_codes_resolve() {
        let jazz = descriptor(29).unwrap();
        assert_eq!(jazz.library, "Anims.j2a");
        assert_eq!((jazz.set, jazz.anim), (55, 12));

        let crate_event = descriptor(551).unwrap();
        assert_eq!(crate_event.draw, DrawFlag::Crate);
        assert_eq!(descriptor(592).unwrap().draw, DrawFlag::Monitor);
    }

    #[test]
    fn invisible_codes_are_absent() {
        assert!(descriptor(0).is_none());
        assert!(descriptor(1).is_none());
        assert!(descriptor(216).is_none());
    }
}
