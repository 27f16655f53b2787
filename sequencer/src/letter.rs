/// Text revealed by the typewriter on the letter screen.
pub const LETTER: &str = "
Gửi Linh,

Anh đã suy nghĩ rất nhiều, không phải về những điều cần nói mà là về cách để em cảm nhận được tất cả những gì anh đang giữ trong lòng. Từ ngày gặp em, cuộc sống của anh bỗng có thêm thật nhiều màu sắc. Mỗi giây phút bên em đều là những ký ức anh trân quý, khắc sâu trong tâm trí.

Linh à, em đặc biệt lắm. Nụ cười của em khiến trái tim anh tan chảy, ánh mắt em làm anh lạc lối và sự ấm áp từ trái tim em đã chạm đến anh. Anh yêu cách em cười, cách em nói và cả những điều nhỏ nhặt nhất làm nên con người em.

Anh tin rằng tình yêu là một hành trình dài và anh muốn được đồng hành cùng em trên con đường ấy. Mình sẽ cùng nhau chia sẻ niềm vui, cùng vượt qua nỗi buồn, và nắm tay nhau đi qua mọi thử thách của cuộc sống.

Bây giờ và mãi mãi về sau, anh muốn trao trọn trái tim mình cho em.

Với tất cả tình yêu và sự chân thành,
Người yêu em.
";
